//! Provider binding layer
//!
//! - [`profile`]: stock panel profiles (capability sets, auth schemes, rate
//!   ceilings) as data
//! - [`rest`]: the concrete binding composing a profile with the request
//!   pipeline and the normalization layer

pub mod profile;
pub mod rest;

pub use profile::{builtin_profiles, AuthScheme, DriverProfile};
pub use rest::RestProvider;

use crate::config::{DriverSettings, GlobalConfig};
use crate::pipeline::{RateLimiterRef, ResponseCacheRef, TransportRef};

/// Everything a driver factory receives from the registry: the merged
/// configuration plus the registry-scoped pipeline collaborators.
#[derive(Clone)]
pub struct DriverContext {
    /// Name the driver was registered under
    pub name: String,
    pub settings: DriverSettings,
    pub global: GlobalConfig,
    pub transport: TransportRef,
    pub limiter: RateLimiterRef,
    pub cache: ResponseCacheRef,
}
