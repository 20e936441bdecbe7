//! Types for representing search table entries

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::key::decode_key;

/// One row of a search table, keyed by symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Encoded lowercase symbol key (`spl_5fpz`)
    pub key: String,
    /// Symbol as it should be displayed (`spl_pz`)
    pub label: String,
    /// Every place the symbol is documented, in table order
    pub targets: Vec<AnchorRef>,
}

impl SearchEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>, targets: Vec<AnchorRef>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            targets,
        }
    }

    /// The key with its `_xx` escapes decoded
    pub fn symbol(&self) -> String {
        decode_key(&self.key)
    }

    /// True when the symbol is documented in more than one place
    pub fn is_ambiguous(&self) -> bool {
        self.targets.len() > 1
    }
}

/// A link to a documented location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRef {
    /// Page path relative to the search directory (`../struct_spl_par.html`)
    pub path: String,
    /// In-page anchor; `None` links to the page itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    /// Link into documentation generated from a tag file
    #[serde(default)]
    pub external: bool,
    /// Raw qualifier text exactly as written in the table
    #[serde(default)]
    pub qualifier: String,
}

impl AnchorRef {
    pub fn new(path: impl Into<String>, fragment: Option<String>, qualifier: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fragment,
            external: false,
            qualifier: qualifier.into(),
        }
    }

    /// Split a table URL into path and fragment at the first `#`
    pub fn from_url(url: &str, external: bool, qualifier: impl Into<String>) -> Self {
        let (path, fragment) = match url.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment.to_string())),
            None => (url, None),
        };
        Self {
            path: path.to_string(),
            fragment,
            external,
            qualifier: qualifier.into(),
        }
    }

    /// The link as written in the table: `path#fragment` or just `path`
    pub fn href(&self) -> String {
        match &self.fragment {
            Some(fragment) => format!("{}#{}", self.path, fragment),
            None => self.path.clone(),
        }
    }

    /// Resolve the page against the directory holding the table files
    ///
    /// Leading `..` components climb out of `search_dir` lexically, without
    /// touching the filesystem.
    pub fn resolve(&self, search_dir: &Path) -> PathBuf {
        let mut resolved = search_dir.to_path_buf();
        for part in self.path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    if !resolved.pop() {
                        resolved.push("..");
                    }
                }
                other => resolved.push(other),
            }
        }
        resolved
    }

    /// Classify the qualifier text
    pub fn context(&self) -> Context {
        Context::parse(&self.qualifier)
    }
}

/// What an anchor's qualifier says about where the symbol lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Context {
    /// Page-level result with no qualifier
    None,
    /// Enclosing struct, class or namespace (`ccl_parameters`, `IntLensPar::spl_pz()`)
    Scope { name: String },
    /// Defining source file (`ccl_constants.h`)
    File { name: String },
    /// Member signature plus defining file (`default_config()` in `ccl_core.c`)
    Member { signature: String, file: String },
}

/// Source extensions Doxygen writes as bare file qualifiers
const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "h", "cc", "cpp", "cxx", "c++", "hh", "hpp", "hxx", "h++", "inc", "py", "f", "f90",
    "for", "java", "cs", "d", "php", "m", "mm", "idl", "md", "dox", "txt", "js", "ts", "rs",
    "tcl", "vhd", "vhdl", "ice", "sql",
];

impl Context {
    /// Classify raw qualifier text, decoding HTML entities first
    pub fn parse(raw: &str) -> Self {
        let text = decode_entities(raw);
        let text = text.trim();
        if text.is_empty() {
            return Context::None;
        }

        // Doxygen separates a member signature from its file with ":&#160;"
        if let Some((signature, file)) = text.rsplit_once(":\u{a0}") {
            return Context::Member {
                signature: signature.trim().to_string(),
                file: file.trim().to_string(),
            };
        }

        if looks_like_file(text) {
            Context::File {
                name: text.to_string(),
            }
        } else {
            Context::Scope {
                name: text.to_string(),
            }
        }
    }

    /// Human-readable form for result listings
    pub fn describe(&self) -> String {
        match self {
            Context::None => String::new(),
            Context::Scope { name } | Context::File { name } => name.clone(),
            Context::Member { signature, file } => format!("{signature} ({file})"),
        }
    }

    /// The defining file, if the qualifier names one
    pub fn file(&self) -> Option<&str> {
        match self {
            Context::File { name } => Some(name),
            Context::Member { file, .. } => Some(file),
            _ => None,
        }
    }
}

fn looks_like_file(text: &str) -> bool {
    if text.contains(char::is_whitespace) || text.contains(&['(', ')', ':'][..]) {
        return false;
    }
    text.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty() && SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    })
}

/// Decode the HTML character references Doxygen emits in labels and qualifiers
///
/// Unknown or malformed references are left untouched.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match candidate.find(';').and_then(|semi| {
            decode_reference(&candidate[1..semi]).map(|c| (c, semi))
        }) {
            Some((c, semi)) => {
                out.push(c);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(&['x', 'X'][..]) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_split_at_first_hash() {
        let anchor = AnchorRef::from_url("../structctest.html#a5d76", false, "ctest");
        assert_eq!(anchor.path, "../structctest.html");
        assert_eq!(anchor.fragment.as_deref(), Some("a5d76"));
        assert_eq!(anchor.href(), "../structctest.html#a5d76");

        let page = AnchorRef::from_url("../struct_spl_par.html", false, "");
        assert_eq!(page.fragment, None);
        assert_eq!(page.href(), "../struct_spl_par.html");
    }

    #[test]
    fn resolve_climbs_out_of_search_dir() {
        let anchor = AnchorRef::from_url("../struct_spl_par.html", false, "");
        assert_eq!(
            anchor.resolve(Path::new("doc/html/search")),
            PathBuf::from("doc/html/struct_spl_par.html")
        );
    }

    #[test]
    fn context_member_with_file() {
        let ctx = Context::parse(
            "dc_NakamuraSuto(ccl_cosmology *cosmo, double a, int *status):&#160;ccl_massfunc.c",
        );
        assert_eq!(
            ctx,
            Context::Member {
                signature: "dc_NakamuraSuto(ccl_cosmology *cosmo, double a, int *status)".into(),
                file: "ccl_massfunc.c".into(),
            }
        );
        assert_eq!(ctx.file(), Some("ccl_massfunc.c"));
    }

    #[test]
    fn context_scopes_and_files() {
        assert_eq!(
            Context::parse("ccl_constants.h"),
            Context::File {
                name: "ccl_constants.h".into()
            }
        );
        assert_eq!(
            Context::parse("IntLensPar::spl_pz()"),
            Context::Scope {
                name: "IntLensPar::spl_pz()".into()
            }
        );
        assert_eq!(
            Context::parse("ccl_test_power.sigma8()"),
            Context::Scope {
                name: "ccl_test_power.sigma8()".into()
            }
        );
        assert_eq!(
            Context::parse("ccl_parameters"),
            Context::Scope {
                name: "ccl_parameters".into()
            }
        );
        assert_eq!(Context::parse(""), Context::None);
    }

    #[test]
    fn entity_decoding() {
        assert_eq!(decode_entities("a&#160;b"), "a\u{a0}b");
        assert_eq!(decode_entities("x &lt; y &amp;&amp; z"), "x < y && z");
        assert_eq!(decode_entities("&#x41;"), "A");
        assert_eq!(decode_entities("R&D; &bogus; &"), "R&D; &bogus; &");
    }

    #[test]
    fn symbol_decodes_key() {
        let entry = SearchEntry::new("spl_5fpz", "spl_pz", vec![]);
        assert_eq!(entry.symbol(), "spl_pz");
    }
}
