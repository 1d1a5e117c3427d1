use rustc_hash::FxHashMap;

use crate::data::{Key, Nation, Region};
use crate::error::{QueryError, Result};

/// Returns the key of the first region whose name matches `r_name` exactly.
pub fn resolve_region<'a>(r_name: &str, regions: &'a [Region]) -> Result<&'a str> {
    regions
        .iter()
        .find(|region| region.name == r_name)
        .map(|region| region.regionkey.as_str())
        .ok_or_else(|| QueryError::RegionNotFound(r_name.to_string()))
}

/// Nations belonging to one region. The key set of `names` is the scope, so
/// every nation in scope has a name by construction.
#[derive(Debug, Clone, Default)]
pub struct NationScope {
    names: FxHashMap<Key, String>,
}

impl NationScope {
    pub fn build(regionkey: &str, nations: &[Nation]) -> Self {
        let names = nations
            .iter()
            .filter(|nation| nation.regionkey == regionkey)
            .map(|nation| (nation.nationkey.clone(), nation.name.clone()))
            .collect();
        NationScope { names }
    }

    pub fn contains(&self, nationkey: &str) -> bool {
        self.names.contains_key(nationkey)
    }

    pub fn name(&self, nationkey: &str) -> Option<&str> {
        self.names.get(nationkey).map(|x| x.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Vec<Region> {
        vec![
            Region::new("1", "AMERICA"),
            Region::new("2", "ASIA"),
            Region::new("7", "ASIA"),
            Region::new("3", "EUROPE"),
        ]
    }

    fn nations() -> Vec<Nation> {
        vec![
            Nation::new("8", "INDIA", "2"),
            Nation::new("12", "JAPAN", "2"),
            Nation::new("7", "GERMANY", "3"),
            Nation::new("18", "CHINA", "2"),
        ]
    }

    #[test]
    fn resolves_first_matching_region() {
        assert_eq!(resolve_region("ASIA", &regions()).unwrap(), "2");
        assert_eq!(resolve_region("EUROPE", &regions()).unwrap(), "3");
    }

    #[test]
    fn region_match_is_exact_and_case_sensitive() {
        for r_name in ["asia", "ASIA ", "AS", ""] {
            match resolve_region(r_name, &regions()) {
                Err(QueryError::RegionNotFound(name)) => assert_eq!(name, r_name),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn scope_keeps_only_nations_of_region() {
        let scope = NationScope::build("2", &nations());
        assert_eq!(scope.len(), 3);
        assert!(scope.contains("8"));
        assert!(scope.contains("18"));
        assert!(!scope.contains("7"));
        assert_eq!(scope.name("12"), Some("JAPAN"));
        assert_eq!(scope.name("7"), None);
    }

    #[test]
    fn region_keys_are_not_parsed_as_numbers() {
        let nations = vec![Nation::new("1", "CHINA", "02"), Nation::new("2", "INDIA", "2")];
        let scope = NationScope::build("2", &nations);
        assert_eq!(scope.len(), 1);
        assert_eq!(scope.name("2"), Some("INDIA"));
    }

    #[test]
    fn region_without_nations_gives_empty_scope() {
        let scope = NationScope::build("5", &nations());
        assert!(scope.is_empty());
    }
}
