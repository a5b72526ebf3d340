use anyhow::Result;
use async_trait::async_trait;
use profiles::{NewProfile, ProfileService};

use super::traits::ProfileNotifier;

/// Adapter wrapping the `profiles` client crate behind the notifier seam.
pub struct ProfileAdapter {
    service: ProfileService,
}

impl ProfileAdapter {
    pub fn new(service: ProfileService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ProfileNotifier for ProfileAdapter {
    async fn create_profile(
        &self,
        auth_id: &str,
        phone: &str,
        name: &str,
        balance: f64,
    ) -> Result<()> {
        let profile = NewProfile {
            auth_id: auth_id.to_string(),
            phone: phone.to_string(),
            name: name.to_string(),
            balance,
        };

        self.service.create_profile(&profile).await?;
        Ok(())
    }
}
