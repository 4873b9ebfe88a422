pub mod media_upload;
