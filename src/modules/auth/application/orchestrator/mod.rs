pub mod signup_orchestrator;
