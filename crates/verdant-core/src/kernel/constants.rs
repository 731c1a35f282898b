/// Framework name
pub const FRAMEWORK_NAME: &str = "Verdant";

/// Framework version
pub const FRAMEWORK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display name used for components declared without a `name`
pub const ANONYMOUS_COMPONENT: &str = "<anonymous>";

/// Environment variable read by the CLI to configure log filtering
pub const LOG_ENV_VAR: &str = "VERDANT_LOG";

/// Elements that never have children or a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Attribute prefix marking a bound attribute (`:title="path"`)
pub const BIND_PREFIX: char = ':';

/// Attribute prefix marking a directive (`v-focus="path"`)
pub const DIRECTIVE_PREFIX: &str = "v-";
