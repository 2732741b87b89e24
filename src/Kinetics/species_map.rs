use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// map {component_id: value} that keeps insertion order.
/// Reaction strings and rate equations are printed in the order the user entered the rows,
/// so a HashMap would not do here.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesMap<V> {
    entries: Vec<(String, V)>,
}

/// signed stoichiometric coefficients: negative for consumed, positive for produced
pub type Stoichiometry = SpeciesMap<f64>;
/// exponents of concentrations in the rate equation, None if the user left the cell empty
pub type Exponents = SpeciesMap<Option<f64>>;

impl<V> Default for SpeciesMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> SpeciesMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == id)
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    /// inserts only if the key is absent; returns false when the key was already there
    pub fn insert_first(&mut self, id: &str, value: V) -> bool {
        if self.contains_key(id) {
            return false;
        }
        self.entries.push((id.to_string(), value));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> FromIterator<(String, V)> for SpeciesMap<V> {
    /// first occurrence of a key wins
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = SpeciesMap::new();
        for (k, v) in iter {
            map.insert_first(&k, v);
        }
        map
    }
}

impl<'a, V> FromIterator<(&'a str, V)> for SpeciesMap<V> {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut map = SpeciesMap::new();
        for (k, v) in iter {
            map.insert_first(k, v);
        }
        map
    }
}

impl Stoichiometry {
    /// components with negative coefficients
    pub fn reagents(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter().filter(|(_, c)| **c < 0.0).map(|(k, c)| (k, *c))
    }

    /// components with positive coefficients
    pub fn products(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter().filter(|(_, c)| **c > 0.0).map(|(k, c)| (k, *c))
    }
}

impl<V: Serialize> Serialize for SpeciesMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for SpeciesMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SpeciesMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for SpeciesMapVisitor<V> {
            type Value = SpeciesMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with component ids as keys")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut map = SpeciesMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert_first(&key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(SpeciesMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_first_keeps_first_value() {
        let mut map: Stoichiometry = SpeciesMap::new();
        assert!(map.insert_first("A", -1.0));
        assert!(!map.insert_first("A", 5.0));
        assert_eq!(map.get("A"), Some(&-1.0));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let map: Stoichiometry = vec![("Z", -1.0), ("A", 2.0), ("M", -3.0)]
            .into_iter()
            .collect();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
        let reagents: Vec<&str> = map.reagents().map(|(k, _)| k).collect();
        assert_eq!(reagents, vec!["Z", "M"]);
        let products: Vec<(&str, f64)> = map.products().collect();
        assert_eq!(products, vec![("A", 2.0)]);
    }

    #[test]
    fn test_json_keeps_order() {
        let map: Exponents = vec![("B", Some(1.0)), ("A", None)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"B":1.0,"A":null}"#);
        let back: Exponents = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
