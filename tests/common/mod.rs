#![allow(dead_code)]

use gateway_admin_api::filter::{FilterRegistry, FilterResolver};

/// Resolver over the built-in tables plus a small `listTeams` table
pub fn resolver() -> FilterResolver {
    let mut registry = FilterRegistry::builtin().expect("built-in filter tables");
    registry.extend(
        FilterRegistry::from_yaml_str(
            r#"
listTeams:
  - key: name
    valueType: stringLike
  - key: size
    valueType: number
  - key: active
    valueType: boolean
  - key: member
    valueType: string
    mapsTo: [members.email, members.username]
"#,
        )
        .expect("fixture filter tables"),
    );
    FilterResolver::new(registry)
}

pub fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
