use std::collections::HashMap;

pub fn builtin_rules() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("default", include_str!("../content/rules/default.yaml")),
        ("server_hp", include_str!("../content/rules/server_hp.yaml")),
    ])
}

pub fn builtin_level_tables() -> &'static str {
    include_str!("../content/levels.yaml")
}
