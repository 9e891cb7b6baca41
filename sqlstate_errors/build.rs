// build.rs - TOML-driven SQLSTATE registry generation
use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const CATEGORIES: &[&str] = &[
    "Warning",
    "Error",
    "InterfaceError",
    "DatabaseError",
    "DataError",
    "OperationalError",
    "IntegrityError",
    "InternalError",
    "ProgrammingError",
    "NotSupportedError",
];

#[derive(serde::Deserialize)]
struct RegistryFile {
    engine: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    class: Vec<ClassDef>,
    #[serde(default)]
    condition: Vec<ConditionDef>,
}

#[derive(serde::Deserialize)]
struct ClassDef {
    class: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
}

#[derive(serde::Deserialize)]
struct ConditionDef {
    code: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SQLSTATE_TABLE_PROFILE");
    println!("cargo:rerun-if-env-changed=SQLSTATE_CONFIG_DIR");

    let profile = env::var("SQLSTATE_TABLE_PROFILE").unwrap_or_else(|_| "postgres".to_string());
    let config_dir = env::var("SQLSTATE_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of sqlstate_errors directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "SQLSTATE registry not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let mut registry: RegistryFile = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_registry(&registry, &config_path.display().to_string());

    // Lookups binary-search both tables
    registry.class.sort_by(|a, b| a.class.as_bytes().cmp(b.class.as_bytes()));
    registry
        .condition
        .sort_by(|a, b| a.code.as_bytes().cmp(b.code.as_bytes()));

    generate_tables(&registry, &profile);
}

fn is_sqlstate_char(c: u8) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase()
}

fn validate_registry(registry: &RegistryFile, origin: &str) {
    let mut classes = HashSet::new();
    for def in &registry.class {
        if def.class.len() != 2 || !def.class.bytes().all(is_sqlstate_char) {
            panic!("{}: invalid SQLSTATE class '{}'", origin, def.class);
        }
        if !classes.insert(def.class.as_str()) {
            panic!("{}: duplicate class '{}'", origin, def.class);
        }
        validate_category(origin, &def.class, def.category.as_deref());
        if def.class == "01" && def.category.as_deref() != Some("Warning") {
            panic!("{}: class 01 must classify as Warning", origin);
        }
    }

    let mut codes = HashSet::new();
    let mut names = HashSet::new();
    for def in &registry.condition {
        if def.code.len() != 5 || !def.code.bytes().all(is_sqlstate_char) {
            panic!("{}: invalid SQLSTATE code '{}'", origin, def.code);
        }
        if !codes.insert(def.code.as_str()) {
            panic!("{}: duplicate code '{}'", origin, def.code);
        }
        if !names.insert(def.name.as_str()) {
            panic!("{}: duplicate condition name '{}'", origin, def.name);
        }
        if !classes.contains(&def.code[..2]) {
            panic!(
                "{}: code '{}' belongs to undeclared class '{}'",
                origin,
                def.code,
                &def.code[..2]
            );
        }
        validate_category(origin, &def.code, def.category.as_deref());
        if def.code.starts_with("01") && def.category.as_deref().unwrap_or("Warning") != "Warning"
        {
            panic!("{}: code '{}' in class 01 must stay a Warning", origin, def.code);
        }
    }
}

fn validate_category(origin: &str, key: &str, category: Option<&str>) {
    if let Some(category) = category {
        if !CATEGORIES.contains(&category) {
            panic!(
                "{}: unknown category '{}' for '{}' (expected one of {:?})",
                origin, category, key, CATEGORIES
            );
        }
    }
}

fn category_expr(category: Option<&str>) -> String {
    match category {
        Some(name) => format!("Some(Category::{})", name),
        None => "None".to_string(),
    }
}

fn generate_tables(registry: &RegistryFile, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("sqlstate_table.rs");

    let mut code = String::new();
    writeln!(
        code,
        "// Generated SQLSTATE registry from TOML configuration\n\
         // Profile: {}\n\
         // DO NOT EDIT - Generated by build.rs\n",
        profile
    )
    .unwrap();

    writeln!(code, "pub const PROFILE: &str = {:?};", profile).unwrap();
    writeln!(code, "pub const ENGINE: &str = {:?};", registry.engine).unwrap();
    writeln!(
        code,
        "pub const SOURCE: &str = {:?};\n",
        registry.source.as_deref().unwrap_or("")
    )
    .unwrap();

    writeln!(code, "pub static CLASSES: &[ClassEntry] = &[").unwrap();
    for def in &registry.class {
        writeln!(
            code,
            "    ClassEntry {{ class: {:?}, name: {:?}, category: {} }},",
            def.class,
            def.name,
            category_expr(def.category.as_deref())
        )
        .unwrap();
    }
    writeln!(code, "];\n").unwrap();

    writeln!(code, "pub static CONDITIONS: &[Condition] = &[").unwrap();
    for def in &registry.condition {
        writeln!(
            code,
            "    Condition {{ code: {:?}, name: {:?}, category: {} }},",
            def.code,
            def.name,
            category_expr(def.category.as_deref())
        )
        .unwrap();
    }
    writeln!(code, "];").unwrap();

    fs::write(output_path, code).unwrap();
}
