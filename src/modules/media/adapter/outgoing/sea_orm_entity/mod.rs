pub mod media_assets;
