use crate::services::paths::absolutize;
use async_trait::async_trait;
use cssparser::{ParseError, ParseErrorKind, Parser, ParserInput, Token};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Exported name → value, in first-seen order.
pub type TokenMap = IndexMap<String, String>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}:{column}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: u32,
        column: u32,
        reason: String,
    },
}

/// Source of the exported tokens of a style sheet.
#[async_trait]
pub trait TokenLoader: Send + Sync {
    /// `initial_contents` stands in for the file on disk when given.
    async fn fetch(&self, path: &Path, initial_contents: Option<&str>)
        -> Result<TokenMap, LoadError>;

    fn clear_cache(&self);
}

/// Token maps keyed by resolved source path. Lives as long as its loader.
#[derive(Default, Debug)]
pub struct TokenCache {
    entries: RwLock<HashMap<PathBuf, TokenMap>>,
}

impl TokenCache {
    pub fn get(&self, path: &Path) -> Option<TokenMap> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(path).cloned()
    }

    pub fn put(&self, path: PathBuf, tokens: TokenMap) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(path, tokens);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads style sheets from disk and collects their local class names and
/// `:export` keys. `@import` and `composes` are not followed.
#[derive(Debug)]
pub struct FileSystemLoader {
    root: PathBuf,
    cache: TokenCache,
}

impl FileSystemLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: TokenCache::default(),
        }
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }
}

#[async_trait]
impl TokenLoader for FileSystemLoader {
    async fn fetch(
        &self,
        path: &Path,
        initial_contents: Option<&str>,
    ) -> Result<TokenMap, LoadError> {
        let resolved = absolutize(path, &self.root);

        // Supplied contents are an unsaved buffer: never cached.
        if let Some(contents) = initial_contents {
            return extract_tokens(&resolved, contents);
        }
        if let Some(tokens) = self.cache.get(&resolved) {
            log::debug!("token cache hit for {}", resolved.display());
            return Ok(tokens);
        }

        let source = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|source| LoadError::Io {
                path: resolved.clone(),
                source,
            })?;
        let tokens = extract_tokens(&resolved, &source)?;
        log::debug!("{} tokens in {}", tokens.len(), resolved.display());
        self.cache.put(resolved, tokens.clone());
        Ok(tokens)
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// Class selectors and `@keyframes` names outside `:global` become
/// `name → name`; `:export` blocks contribute `key → value`.
pub fn extract_tokens(path: &Path, source: &str) -> Result<TokenMap, LoadError> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    let mut tokens = TokenMap::new();

    walk_rules(&mut parser, &mut tokens, true).map_err(|e| {
        let reason = match e.kind {
            ParseErrorKind::Custom(reason) => reason,
            ParseErrorKind::Basic(basic) => format!("{:?}", basic),
        };
        LoadError::Parse {
            path: path.to_path_buf(),
            line: e.location.line + 1,
            column: e.location.column,
            reason,
        }
    })?;
    Ok(tokens)
}

#[derive(Default)]
struct Prelude {
    classes: Vec<String>,
    after_dot: bool,
    after_colon: bool,
    global: bool,
    export: bool,
    keyframes: bool,
    animation: Option<String>,
}

impl Prelude {
    fn reset(&mut self) {
        *self = Prelude::default();
    }
}

fn walk_rules<'i>(
    input: &mut Parser<'i, '_>,
    tokens: &mut TokenMap,
    top_level: bool,
) -> Result<(), ParseError<'i, String>> {
    let mut prelude = Prelude::default();

    loop {
        let token = match input.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };
        let after_dot = std::mem::take(&mut prelude.after_dot);
        let after_colon = std::mem::take(&mut prelude.after_colon);

        match token {
            Token::Delim('.') => prelude.after_dot = true,
            Token::Colon => prelude.after_colon = true,
            Token::Ident(name) if after_dot => {
                if !prelude.global {
                    prelude.classes.push(name.to_string());
                }
            }
            Token::Ident(name) if after_colon => {
                if name.eq_ignore_ascii_case("global") {
                    prelude.global = true;
                } else if name.eq_ignore_ascii_case("local") {
                    prelude.global = false;
                } else if name.eq_ignore_ascii_case("export") {
                    prelude.export = true;
                }
            }
            Token::Ident(name) if prelude.keyframes => {
                if !prelude.global {
                    prelude.animation = Some(name.to_string());
                }
            }
            Token::AtKeyword(name) if is_keyframes_rule(&name) => prelude.keyframes = true,
            Token::Comma => prelude.global = false,
            Token::Function(name) if after_colon && name.eq_ignore_ascii_case("global") => {}
            Token::Function(name)
                if prelude.keyframes && after_colon && name.eq_ignore_ascii_case("local") =>
            {
                let local = input.parse_nested_block(|nested| {
                    nested
                        .expect_ident_cloned()
                        .map_err(ParseError::<String>::from)
                })?;
                prelude.animation = Some(local.to_string());
            }
            Token::Function(name) => {
                let global = if after_colon && name.eq_ignore_ascii_case("local") {
                    false
                } else {
                    prelude.global
                };
                input.parse_nested_block(|nested| {
                    collect_classes(nested, &mut prelude.classes, global)
                })?;
            }
            Token::ParenthesisBlock | Token::SquareBracketBlock => {
                let global = prelude.global;
                input.parse_nested_block(|nested| {
                    collect_classes(nested, &mut prelude.classes, global)
                })?;
            }
            Token::CurlyBracketBlock => {
                if prelude.export {
                    input.parse_nested_block(|nested| read_exports(nested, tokens))?;
                } else if prelude.keyframes {
                    // Keyframe selectors (`from`, `50%`) are not classes.
                    if let Some(name) = prelude.animation.take() {
                        tokens.entry(name.clone()).or_insert(name);
                    }
                } else {
                    for class in prelude.classes.drain(..) {
                        tokens.entry(class.clone()).or_insert(class);
                    }
                    input.parse_nested_block(|nested| walk_rules(nested, tokens, false))?;
                }
                prelude.reset();
            }
            Token::Semicolon => prelude.reset(),
            Token::CloseCurlyBracket if top_level => {
                return Err(input.new_custom_error("unmatched `}`".to_string()));
            }
            Token::BadString(_) => {
                return Err(input.new_custom_error("unterminated string".to_string()));
            }
            Token::BadUrl(_) => {
                return Err(input.new_custom_error("malformed url()".to_string()));
            }
            _ => {}
        }
    }
    Ok(())
}

/// `@keyframes` and its vendor-prefixed spellings.
fn is_keyframes_rule(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name == "keyframes" || (name.starts_with('-') && name.ends_with("-keyframes"))
}

fn collect_classes<'i>(
    input: &mut Parser<'i, '_>,
    classes: &mut Vec<String>,
    mut global: bool,
) -> Result<(), ParseError<'i, String>> {
    let mut after_dot = false;
    let mut after_colon = false;

    loop {
        let token = match input.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };
        let (dot, colon) = (after_dot, after_colon);
        after_dot = false;
        after_colon = false;

        match token {
            Token::Delim('.') => after_dot = true,
            Token::Colon => after_colon = true,
            Token::Ident(name) if dot => {
                if !global {
                    classes.push(name.to_string());
                }
            }
            Token::Ident(name) if colon => {
                if name.eq_ignore_ascii_case("global") {
                    global = true;
                } else if name.eq_ignore_ascii_case("local") {
                    global = false;
                }
            }
            Token::Function(name) if colon && name.eq_ignore_ascii_case("global") => {}
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                input.parse_nested_block(|nested| collect_classes(nested, classes, global))?;
            }
            Token::BadString(_) => {
                return Err(input.new_custom_error("unterminated string".to_string()));
            }
            _ => {}
        }
    }
    Ok(())
}

fn read_exports<'i>(
    input: &mut Parser<'i, '_>,
    tokens: &mut TokenMap,
) -> Result<(), ParseError<'i, String>> {
    loop {
        let token = match input.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };
        let name = match token {
            Token::Ident(name) => name.to_string(),
            Token::Semicolon => continue,
            other => {
                return Err(input.new_custom_error(format!(
                    "expected an export name, found {:?}",
                    other
                )));
            }
        };
        if input.expect_colon().is_err() {
            return Err(input.new_custom_error(format!("missing `:` after export {}", name)));
        }

        let start = input.position();
        let mut end = start;
        loop {
            let done = matches!(
                input.next_including_whitespace(),
                Ok(Token::Semicolon) | Err(_)
            );
            if done {
                break;
            }
            end = input.position();
        }
        let value = input.slice(start..end).trim().to_string();
        tokens.insert(name, value);
    }
    Ok(())
}
