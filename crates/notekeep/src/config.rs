//! Configuration for Notekeep.

use notekeep_core::credential::{
    DEFAULT_ITERATIONS, DEFAULT_SALT_LEN, MIN_ITERATIONS, MIN_SALT_LEN,
};
use notekeep_core::{Page, PageError, PasswordHasher, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::{NotekeepError, Result};

/// Password stretching parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    /// PBKDF2 iteration count.
    pub iterations: u32,
    /// Random salt length in bytes.
    pub salt_len: usize,
}

impl PasswordConfig {
    /// Build the hasher these parameters describe.
    pub fn hasher(&self) -> PasswordHasher {
        PasswordHasher::new(self.iterations, self.salt_len)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            salt_len: DEFAULT_SALT_LEN,
        }
    }
}

/// Configuration for Notekeep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotekeepConfig {
    /// Password stretching.
    pub password: PasswordConfig,
    /// Largest page a caller may request.
    pub max_page_size: u32,
    /// Page size when the caller does not specify one.
    pub default_page_size: u32,
}

impl Default for NotekeepConfig {
    fn default() -> Self {
        Self {
            password: PasswordConfig::default(),
            max_page_size: MAX_PAGE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl NotekeepConfig {
    /// Check the configuration for values that would weaken or break the core.
    pub fn validate(&self) -> Result<()> {
        if self.password.iterations < MIN_ITERATIONS {
            return Err(NotekeepError::Config(format!(
                "password iterations {} below minimum {}",
                self.password.iterations, MIN_ITERATIONS
            )));
        }
        if self.password.salt_len < MIN_SALT_LEN {
            return Err(NotekeepError::Config(format!(
                "salt length {} below minimum {}",
                self.password.salt_len, MIN_SALT_LEN
            )));
        }
        if self.max_page_size == 0 {
            return Err(NotekeepError::Config("max_page_size must be positive".into()));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(NotekeepError::Config(format!(
                "default_page_size {} outside 1..={}",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }

    /// Validate request page parameters, filling in defaults for missing ones.
    pub fn page(&self, number: Option<u32>, size: Option<u32>) -> std::result::Result<Page, PageError> {
        Page::new(
            number.unwrap_or(1),
            size.unwrap_or(self.default_page_size),
            self.max_page_size,
        )
    }
}
