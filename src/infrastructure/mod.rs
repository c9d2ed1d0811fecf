// External-collaborator concerns: filesystem touchpoints and hooks
pub mod env_stub;
pub mod hooks;

pub use env_stub::EnvStubManager;
pub use hooks::HookRegistry;
