use alloc::sync::Arc;
use core::fmt;

/// A function applied to every fully composed key.
pub type KeyTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Settings of a [`Marshaler`](crate::Marshaler) or
/// [`Unmarshaler`](crate::Unmarshaler).
///
/// A plan is compiled against the configuration of its engine, so two engines
/// with different settings never share plans.
///
/// ```
/// use sm_codec::Config;
///
/// let config = Config::new()
///     .with_delimiter("_")
///     .with_key_transform(|key| key.to_uppercase());
///
/// assert_eq!(config.delimiter(), "_");
/// assert_eq!(config.transform_key("user_id".into()), "USER_ID");
///
/// // An empty delimiter falls back to the default.
/// assert_eq!(Config::new().with_delimiter("").delimiter(), ".");
/// ```
#[derive(Clone, Default)]
pub struct Config {
    delimiter: String,
    key_transform: Option<KeyTransform>,
}

impl Config {
    /// The delimiter used when none, or an empty one, is configured.
    pub const DEFAULT_DELIMITER: &str = ".";

    /// Creates the default configuration: `.` delimiter, no key transform.
    #[inline]
    pub const fn new() -> Self {
        Self {
            delimiter: String::new(),
            key_transform: None,
        }
    }

    /// Sets the string joining the segments of a nested key.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Sets a function applied to every composed key, in both directions.
    pub fn with_key_transform(
        mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.key_transform = Some(Arc::new(transform));
        self
    }

    /// Returns the effective delimiter.
    #[inline]
    pub fn delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            Self::DEFAULT_DELIMITER
        } else {
            &self.delimiter
        }
    }

    /// Returns the key transform, if any.
    #[inline]
    pub fn key_transform(&self) -> Option<&KeyTransform> {
        self.key_transform.as_ref()
    }

    /// Applies the key transform to `key`, or returns it unchanged.
    pub fn transform_key(&self, key: String) -> String {
        match &self.key_transform {
            Some(transform) => transform(&key),
            None => key,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("delimiter", &self.delimiter())
            .field("key_transform", &self.key_transform.is_some())
            .finish()
    }
}
