// Infrastructure layer: dependency-injection seams and their adapters.

pub mod profile_adapter;
pub mod test_dependencies;
pub mod traits;

pub use profile_adapter::ProfileAdapter;
pub use traits::{CredentialStore, ProfileNotifier};
