//! Account identifier generation

use chrono::{DateTime, Utc};
use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng, TryRngCore};

/// Identifier generator Trait
///
/// Values only need to be unique across the accounts a process creates and
/// representable as strings; nothing else depends on their format.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random UUID generator
///
/// Draws 16 bytes from the OS CSPRNG and formats them as a v4 UUID. When the
/// OS generator is unavailable it falls back to `<unix-millis>-<random hex>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultIdGenerator;

impl DefaultIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn fallback_id(now: DateTime<Utc>) -> String {
        let seed = now.timestamp_nanos_opt().unwrap_or_default().cast_unsigned();
        let suffix = SmallRng::seed_from_u64(seed).next_u32();
        format!("{}-{suffix:08x}", now.timestamp_millis())
    }
}

impl IdGenerator for DefaultIdGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; 16];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => uuid::Builder::from_random_bytes(bytes)
                .into_uuid()
                .to_string(),
            Err(e) => {
                log::warn!("OS random source unavailable, using timestamp id: {e}");
                Self::fallback_id(Utc::now())
            }
        }
    }
}
