/// Separator used between every line of a generated file, on every platform.
pub const LINE_SEPARATOR: &str = "\n";

pub const DECLARATION_EXTENSION: &str = ".d.ts";

pub const INTERFACE_OPEN: &str = "interface IStyles {";
pub const INTERFACE_CLOSE: &str = "}";
pub const INDEX_SIGNATURE_KEY: &str = "[name: string]";
pub const DECLARE_STYLES: &str = "declare var styles: IStyles";
pub const EXPORT_STYLES: &str = "export = styles";

pub const TAB_INDENT: &str = "\t";
pub const SPACE_INDENT: &str = "  ";
pub const SEMICOLON: &str = ";";

pub const DEFAULT_PATTERN: &str = "**/*.css";
pub const DEFAULT_CONFIG_FILE: &str = "tcm.toml";

/// Member names that would clash with the generated block itself.
pub const RESERVED_MEMBERS: &[&str] = &[INDEX_SIGNATURE_KEY, "__proto__"];

/// ECMAScript reserved words, strict-mode reserved words and literals.
pub const RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];
