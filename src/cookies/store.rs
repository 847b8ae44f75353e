//! Cookie storage abstraction
//!
//! The session client only ever reads and writes cookies through
//! [`CookieStore`], so the same client code runs against a browser-like jar,
//! a single incoming server request, or a test fixture.

use super::header::{CookieOptions, parse_cookie_header, render_set_cookie};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Key-value cookie access scoped to one request context
pub trait CookieStore: Send + Sync + Debug {
    /// Read a cookie value
    fn get(&self, name: &str) -> Option<String>;

    /// Write a cookie value with the given attributes
    fn set(&self, name: &str, value: &str, options: &CookieOptions);

    /// Remove a cookie
    fn remove(&self, name: &str, path: Option<&str>);
}

/// A cookie written through the store, kept so it can be replayed as a
/// `Set-Cookie` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieWrite {
    /// Cookie name
    pub name: String,
    /// Cookie value (empty for removals)
    pub value: String,
    /// Attributes
    pub options: CookieOptions,
}

impl CookieWrite {
    /// Render as a `Set-Cookie` header value
    pub fn to_header_value(&self) -> String {
        render_set_cookie(&self.name, &self.value, &self.options)
    }
}

#[derive(Debug, Default)]
struct Jar {
    values: HashMap<String, String>,
    writes: Vec<CookieWrite>,
}

/// In-memory cookie store
///
/// Clones share the same jar. Every write is also recorded so a server
/// handler can turn it into `Set-Cookie` headers.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    jar: Arc<RwLock<Jar>>,
}

impl MemoryCookieStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a `Cookie` request header
    pub fn from_header(header: &str) -> Self {
        Self::from_pairs(parse_cookie_header(header))
    }

    /// Build a store from name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            jar: Arc::new(RwLock::new(Jar {
                values,
                writes: Vec::new(),
            })),
        }
    }

    /// Whether a cookie is currently present
    pub fn contains(&self, name: &str) -> bool {
        self.jar.read().values.contains_key(name)
    }

    /// Every write made through this store, oldest first
    pub fn writes(&self) -> Vec<CookieWrite> {
        self.jar.read().writes.clone()
    }

    /// `Set-Cookie` header values for every write, oldest first
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.jar
            .read()
            .writes
            .iter()
            .map(CookieWrite::to_header_value)
            .collect()
    }

    /// Current name/value pairs
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.jar.read().values.clone()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.read().values.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) {
        let mut jar = self.jar.write();
        if options.max_age == Some(0) {
            jar.values.remove(name);
        } else {
            jar.values.insert(name.to_string(), value.to_string());
        }
        jar.writes.push(CookieWrite {
            name: name.to_string(),
            value: value.to_string(),
            options: options.clone(),
        });
    }

    fn remove(&self, name: &str, path: Option<&str>) {
        self.set(name, "", &CookieOptions::expired(path.map(str::to_string)));
    }
}
