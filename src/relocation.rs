//! The relocation map: which type names move, and where they currently come from
//!
//! A map is an ordered list of rules plus the single destination module every
//! rule moves into. Rules are tried in the order they were declared.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

use crate::error::{Result, TypemoveError};

/// Shared module that relocated types are imported from.
pub const DEFAULT_DESTINATION: &str = "@/types";

/// Built-in table of types that used to be exported from the storage modules.
const BUILTIN_RULES: &[(&str, &str)] = &[
    ("Product", "@/utils/dummyData"),
    ("CartItem", "@/utils/dummyData"),
    ("Order", "@/utils/orderStorage"),
    ("Review", "@/utils/boardStorage"),
    ("ProductInquiry", "@/utils/boardStorage"),
    ("OneToOneInquiry", "@/utils/boardStorage"),
    ("Notice", "@/utils/boardStorage"),
    ("FAQ", "@/utils/boardStorage"),
    ("AdminUser", "@/utils/userStorage"),
    ("User", "@/utils/userStorage"),
];

/// One type name and the module it is currently imported from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRule {
    pub type_name: String,
    pub source_module: String,
}

/// Immutable, ordered set of relocation rules sharing one destination.
#[derive(Debug, Clone)]
pub struct RelocationMap {
    destination: String,
    rules: Vec<RelocationRule>,
}

impl RelocationMap {
    /// Build a map, rejecting a type declared twice or a type that would move
    /// into the module it already comes from.
    pub fn new<I, N, M>(destination: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, M)>,
        N: Into<String>,
        M: Into<String>,
    {
        let destination = destination.into();
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for (name, module) in entries {
            let rule = RelocationRule {
                type_name: name.into(),
                source_module: module.into(),
            };
            if !seen.insert(rule.type_name.clone()) {
                return Err(TypemoveError::DuplicateType(rule.type_name));
            }
            if rule.source_module == destination {
                return Err(TypemoveError::SelfRelocation {
                    type_name: rule.type_name,
                    module: destination,
                });
            }
            rules.push(rule);
        }

        Ok(Self { destination, rules })
    }

    /// The table compiled into the tool, moving into `@/types`.
    pub fn builtin() -> Self {
        Self {
            destination: DEFAULT_DESTINATION.to_string(),
            rules: BUILTIN_RULES
                .iter()
                .map(|(name, module)| RelocationRule {
                    type_name: (*name).to_string(),
                    source_module: (*module).to_string(),
                })
                .collect(),
        }
    }

    /// Parse a map from JSON of the form
    /// `{"destination": "@/types", "types": {"Product": "@/utils/dummyData"}}`.
    ///
    /// `path` is only used for error reporting.
    pub fn from_json_str(json: &str, path: &Path) -> Result<Self> {
        let file: MapFile = serde_json::from_str(json).map_err(|source| TypemoveError::MapFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file.destination, file.types)
    }

    /// Load a map from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| TypemoveError::io(path, e))?;
        Self::from_json_str(&json, path)
    }

    /// Replace the destination module, re-checking every rule against it.
    pub fn with_destination(self, destination: impl Into<String>) -> Result<Self> {
        let entries = self
            .rules
            .into_iter()
            .map(|rule| (rule.type_name, rule.source_module));
        Self::new(destination, entries)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn rules(&self) -> &[RelocationRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MapFile {
    #[serde(default = "default_destination")]
    destination: String,
    #[serde(deserialize_with = "ordered_entries")]
    types: Vec<(String, String)>,
}

fn default_destination() -> String {
    DEFAULT_DESTINATION.to_string()
}

/// Read a JSON object as key/value pairs in document order, keeping duplicate
/// keys so the map constructor can reject them.
fn ordered_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping type names to module paths")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::new();
            while let Some((name, module)) = access.next_entry::<String, String>()? {
                entries.push((name, module));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_map_is_valid() {
        let builtin = RelocationMap::builtin();
        let rebuilt = RelocationMap::new(
            builtin.destination().to_string(),
            builtin
                .rules()
                .iter()
                .map(|r| (r.type_name.clone(), r.source_module.clone())),
        );
        assert!(rebuilt.is_ok(), "builtin table must pass validation");
        assert_eq!(builtin.len(), 10);
        assert_eq!(builtin.destination(), "@/types");
    }

    #[test]
    fn test_builtin_order_is_declaration_order() {
        let builtin = RelocationMap::builtin();
        let names: Vec<_> = builtin.rules().iter().map(|r| r.type_name.as_str()).collect();
        assert_eq!(names.first(), Some(&"Product"));
        assert_eq!(names.last(), Some(&"User"));
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let result = RelocationMap::new("@/types", [("Order", "@/a"), ("Order", "@/b")]);
        assert!(matches!(result, Err(TypemoveError::DuplicateType(name)) if name == "Order"));
    }

    #[test]
    fn test_self_relocation_rejected() {
        let result = RelocationMap::new("@/types", [("Order", "@/types")]);
        assert!(matches!(result, Err(TypemoveError::SelfRelocation { .. })));
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let json = r#"{"destination": "@/shared", "types": {"Zed": "@/z", "Alpha": "@/a"}}"#;
        let map = RelocationMap::from_json_str(json, Path::new("map.json")).unwrap();
        assert_eq!(map.destination(), "@/shared");
        let names: Vec<_> = map.rules().iter().map(|r| r.type_name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Alpha"]);
    }

    #[test]
    fn test_from_json_default_destination() {
        let json = r#"{"types": {"Order": "@/utils/orderStorage"}}"#;
        let map = RelocationMap::from_json_str(json, Path::new("map.json")).unwrap();
        assert_eq!(map.destination(), DEFAULT_DESTINATION);
    }

    #[test]
    fn test_from_json_duplicate_key_rejected() {
        let json = r#"{"types": {"Order": "@/a", "Order": "@/b"}}"#;
        let result = RelocationMap::from_json_str(json, Path::new("map.json"));
        assert!(matches!(result, Err(TypemoveError::DuplicateType(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        let result = RelocationMap::from_json_str("{\"types\": [1, 2]}", Path::new("bad.json"));
        match result {
            Err(TypemoveError::MapFile { path, .. }) => assert_eq!(path, Path::new("bad.json")),
            other => panic!("expected MapFile error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_destination_revalidates() {
        let map = RelocationMap::new("@/types", [("Order", "@/shared")]).unwrap();
        assert!(map.clone().with_destination("@/models").is_ok());
        assert!(map.with_destination("@/shared").is_err());
    }
}
