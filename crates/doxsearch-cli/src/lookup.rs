//! Implementation of the `doxsearch lookup` command.

use anyhow::Result;
use std::io::Write;
use tracing::debug;

use doxsearch_core::search::render_results;
use doxsearch_core::SearchIndex;

/// Options for a prefix lookup.
#[derive(Debug)]
pub struct LookupOptions {
    /// Prefix typed by the user.
    pub prefix: String,
    /// Maximum number of results to print.
    pub limit: usize,
    /// Emit JSON instead of text.
    pub json: bool,
}

/// Print every entry matching the prefix, up to the limit.
pub fn run(index: &SearchIndex, options: &LookupOptions, out: &mut impl Write) -> Result<()> {
    let matches = index.table.lookup(&options.prefix);
    debug!(prefix = %options.prefix, matches = matches.len(), "lookup");

    let results = render_results(matches.iter().copied(), Some(&index.dir), Some(options.limit));

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &results)?;
        writeln!(out)?;
        return Ok(());
    }

    if matches.is_empty() {
        writeln!(out, "No results found")?;
        return Ok(());
    }

    for result in &results {
        writeln!(out, "{result}")?;
    }
    let hidden = matches.len() - results.len();
    if hidden > 0 {
        writeln!(out, "... and {hidden} more (raise --limit to see them)")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const TABLE: &str = "var searchData=\n[\n  \
        ['spl_5fpz',['spl_pz',['../struct_int_lens_par.html#af03',1,'IntLensPar::spl_pz()'],\
        ['../struct_int_mag_par.html#a97',1,'IntMagPar::spl_pz()']]],\n  \
        ['spline',['spline',['../struct_spl_par.html#ae8f',1,'SplPar']]],\n  \
        ['splpar',['SplPar',['../struct_spl_par.html',1,'']]]\n];\n";

    fn index() -> (tempfile::TempDir, SearchIndex) {
        let dir = tempfile::tempdir().unwrap();
        let search = dir.path().join("search");
        std::fs::create_dir(&search).unwrap();
        std::fs::write(search.join("all_11.js"), TABLE).unwrap();
        let index = SearchIndex::load_dir(&search, doxsearch_core::DEFAULT_PATTERN).unwrap();
        (dir, index)
    }

    fn lookup(index: &SearchIndex, prefix: &str, limit: usize, json: bool) -> String {
        let options = LookupOptions {
            prefix: prefix.to_string(),
            limit,
            json,
        };
        let mut out = Vec::new();
        run(index, &options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_output_resolves_pages() {
        let (dir, index) = index();
        let output = lookup(&index, "splp", 10, false);
        let page = dir.path().join("struct_spl_par.html");
        assert_eq!(output, format!("SplPar\n    {}\n", page.display()));
    }

    #[test]
    fn limit_reports_hidden_results() {
        let (_dir, index) = index();
        let output = lookup(&index, "spl", 1, false);
        assert!(output.starts_with("spl_pz\n    IntLensPar::spl_pz()  "));
        assert!(output.ends_with("... and 2 more (raise --limit to see them)\n"));
    }

    #[test]
    fn zero_limit_still_reports_matches() {
        let (_dir, index) = index();
        assert_eq!(
            lookup(&index, "spline", 0, false),
            "... and 1 more (raise --limit to see them)\n"
        );
    }

    #[test]
    fn no_results() {
        let (_dir, index) = index();
        assert_eq!(lookup(&index, "zzzzz", 10, false), "No results found\n");
    }

    #[test]
    fn json_output() {
        let (_dir, index) = index();
        let output = lookup(&index, "SPL_", 10, true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let results = value.as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["label"], "spl_pz");
        assert_eq!(results[0]["hits"][1]["context"]["kind"], "scope");
        assert_eq!(results[0]["hits"][1]["context"]["name"], "IntMagPar::spl_pz()");
        assert!(Path::new(results[0]["hits"][0]["page"].as_str().unwrap()).ends_with("struct_int_lens_par.html#af03"));
    }
}
