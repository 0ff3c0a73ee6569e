use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// A read-only provider of string values keyed by name.
///
/// Lookups must be deterministic for the duration of one binding call.
pub trait ValueSource {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<S: ValueSource + ?Sized> ValueSource for &S {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<H: BuildHasher> ValueSource for HashMap<String, String, H> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl ValueSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Adapts a closure into a [`ValueSource`].
#[derive(Clone)]
pub struct FnSource<F> {
    lookup: F,
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

impl<F> ValueSource for FnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }
}

/// Wraps `lookup` so it can be handed to a binder.
pub fn from_fn<F>(lookup: F) -> FnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    FnSource { lookup }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_map_lookup() {
        let map = HashMap::from([("APP_HOST".to_string(), "db.internal".to_string())]);

        assert_eq!(map.lookup("APP_HOST").as_deref(), Some("db.internal"));
        assert_eq!(map.lookup("APP_PORT"), None);
    }

    #[test]
    fn test_hash_map_custom_hasher() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::BuildHasherDefault;

        let mut map: HashMap<String, String, BuildHasherDefault<DefaultHasher>> =
            HashMap::default();
        map.insert("APP_PORT".to_string(), "5432".to_string());

        assert_eq!(map.lookup("APP_PORT").as_deref(), Some("5432"));
        assert_eq!(map.lookup("APP_HOST"), None);
    }

    #[test]
    fn test_fn_source_lookup() {
        let source = from_fn(|key| (key == "X").then(|| "1".to_string()));

        assert_eq!(source.lookup("X").as_deref(), Some("1"));
        assert_eq!(source.lookup("Y"), None);
    }

    #[test]
    fn test_boxed_dyn_source() {
        let map = BTreeMap::from([("K".to_string(), String::new())]);
        let boxed: Box<dyn ValueSource> = Box::new(map);

        fn read(source: impl ValueSource) -> Option<String> {
            source.lookup("K")
        }
        assert_eq!(read(&boxed).as_deref(), Some(""));
    }
}
