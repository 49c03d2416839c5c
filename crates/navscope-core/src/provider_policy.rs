use std::time::Duration;

use crate::ProviderId;

/// Client-side request budget for one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPolicy {
    pub provider_id: ProviderId,
    pub quota_window: Duration,
    pub quota_limit: u32,
}

impl ProviderPolicy {
    pub fn mfapi_default() -> Self {
        Self {
            provider_id: ProviderId::Mfapi,
            quota_window: Duration::from_secs(60),
            quota_limit: 60,
        }
    }
}
