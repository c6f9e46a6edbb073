use std::path::{Path, PathBuf};

use crate::error::AliasError;

use super::ProjectConfig;

const TSCONFIG: &str = "tsconfig.json";

/// Walk up directories from `start` looking for tsconfig.json.
pub(crate) fn find_tsconfig(start: &Path) -> Result<PathBuf, AliasError> {
    let mut dir = if start.is_dir() {
        start.to_path_buf()
    } else {
        start
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    };

    loop {
        let candidate = dir.join(TSCONFIG);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !dir.pop() {
            return Err(AliasError::NoProjectConfig(start.display().to_string()));
        }
    }
}

/// Parse `compilerOptions.paths` and `baseUrl` from a tsconfig file.
pub(crate) fn load_project_config(tsconfig_path: &Path) -> Result<ProjectConfig, AliasError> {
    let content =
        std::fs::read_to_string(tsconfig_path).map_err(|e| AliasError::io(tsconfig_path, e))?;
    parse_project_config(tsconfig_path, &content)
}

fn parse_project_config(tsconfig_path: &Path, content: &str) -> Result<ProjectConfig, AliasError> {
    let display = || tsconfig_path.display().to_string();
    let stripped = strip_trailing_commas(&strip_jsonc_comments(content));

    let val: serde_json::Value =
        serde_json::from_str(&stripped).map_err(|e| AliasError::ConfigParse {
            path: display(),
            message: e.to_string(),
        })?;

    let tsconfig_dir = tsconfig_path.parent().unwrap_or(Path::new("."));
    let compiler = val.get("compilerOptions");

    let base_dir = compiler
        .and_then(|c| c.get("baseUrl"))
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| tsconfig_dir.to_path_buf(), |b| tsconfig_dir.join(b));

    let paths = compiler
        .and_then(|c| c.get("paths"))
        .and_then(serde_json::Value::as_object)
        .ok_or_else(|| AliasError::NoPathMappings(display()))?;

    let mut mappings = Vec::with_capacity(paths.len());
    for (pattern, targets) in paths {
        let Some(targets) = targets.as_array() else {
            return Err(AliasError::ConfigParse {
                path: display(),
                message: format!("paths[\"{pattern}\"] must be an array"),
            });
        };
        let candidates: Vec<String> = targets
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();
        mappings.push((pattern.clone(), candidates));
    }

    tracing::debug!(
        tsconfig = %tsconfig_path.display(),
        base = %base_dir.display(),
        count = mappings.len(),
        "loaded path mappings"
    );

    Ok(ProjectConfig {
        tsconfig_path: tsconfig_path.to_path_buf(),
        base_dir: crate::util::normalize(&base_dir),
        mappings,
    })
}

/// Strip JSONC comments (`//` line and `/* */` block) while respecting strings.
fn strip_jsonc_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        // String literal: copy verbatim until closing quote
        if ch == '"' {
            out.push(ch);
            while let Some(c) = chars.next() {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == '"' {
                    break;
                }
            }
            continue;
        }

        if ch == '/' && chars.peek() == Some(&'/') {
            while let Some(&c) = chars.peek() {
                if c == '\n' {
                    break;
                }
                chars.next();
            }
            continue;
        }

        if ch == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut prev = '\0';
            for c in chars.by_ref() {
                if prev == '*' && c == '/' {
                    break;
                }
                prev = c;
            }
            continue;
        }

        out.push(ch);
    }

    out
}

/// Drop commas directly followed (modulo whitespace) by `}` or `]`.
fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 1;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if !matches!(next, Some('}' | ']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // --- JSONC stripping ---

    #[test]
    fn strip_jsonc_removes_line_comments() {
        let input = "{\n  // This is a comment\n  \"key\": \"value\"\n}";
        let result = strip_jsonc_comments(input);
        assert!(!result.contains("//"));
        assert!(result.contains("\"key\": \"value\""));
    }

    #[test]
    fn strip_jsonc_removes_block_comments() {
        let input = "{\n  /* block comment */\n  \"key\": \"value\"\n}";
        let result = strip_jsonc_comments(input);
        assert!(!result.contains("/*"));
        assert!(result.contains("\"key\": \"value\""));
    }

    #[test]
    fn strip_jsonc_preserves_strings_with_slashes() {
        let input = r#"{ "paths": { "@/*": ["./src/*"] }, "url": "https://example.com" }"#;
        assert_eq!(strip_jsonc_comments(input), input);
    }

    #[test]
    fn strip_trailing_commas_before_closers() {
        let input = "{ \"a\": [1, 2,], \"b\": \"x,}\", }";
        assert_eq!(strip_trailing_commas(input), "{ \"a\": [1, 2], \"b\": \"x,}\" }");
    }

    // --- parse_project_config ---

    #[test]
    fn parse_keeps_declaration_order() {
        let cfg = parse_project_config(
            Path::new("/p/tsconfig.json"),
            r##"{ "compilerOptions": { "paths": {
                "@/*": ["./*"], "@/sub/*": ["./other/*"], "#lib": ["./lib/index"]
            } } }"##,
        )
        .unwrap();
        let patterns: Vec<_> = cfg.mappings.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(patterns, vec!["@/*", "@/sub/*", "#lib"]);
        assert_eq!(cfg.base_dir, PathBuf::from("/p"));
    }

    #[test]
    fn parse_applies_base_url() {
        let cfg = parse_project_config(
            Path::new("/p/tsconfig.json"),
            r#"{ "compilerOptions": { "baseUrl": "./src", "paths": { "@/*": ["*"] } } }"#,
        )
        .unwrap();
        assert_eq!(cfg.base_dir, PathBuf::from("/p/src"));
    }

    #[test]
    fn parse_without_paths_is_an_error() {
        let err = parse_project_config(
            Path::new("/p/tsconfig.json"),
            r#"{ "compilerOptions": { "strict": true } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, AliasError::NoPathMappings(_)));
    }

    #[test]
    fn parse_invalid_json_is_an_error() {
        let err = parse_project_config(Path::new("/p/tsconfig.json"), "{ nope").unwrap_err();
        assert!(matches!(err, AliasError::ConfigParse { .. }));
    }

    #[test]
    fn parse_rejects_non_array_targets() {
        let err = parse_project_config(
            Path::new("/p/tsconfig.json"),
            r#"{ "compilerOptions": { "paths": { "@/*": "./*" } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, AliasError::ConfigParse { .. }));
    }

    // --- disk lookup ---

    #[test]
    fn load_project_config_handles_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        let tsconfig = dir.path().join("tsconfig.json");
        fs::write(
            &tsconfig,
            r#"{
  // compiler settings
  "compilerOptions": {
    /* path aliases */
    "paths": {
      "@/*": ["./src/*", "./legacy/*"],
    },
  }
}"#,
        )
        .unwrap();

        let cfg = load_project_config(&tsconfig).unwrap();
        assert_eq!(cfg.mappings.len(), 1);
        assert_eq!(cfg.mappings[0].1, vec!["./src/*", "./legacy/*"]);
    }

    #[test]
    fn find_tsconfig_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let tsconfig = dir.path().join("tsconfig.json");
        fs::write(&tsconfig, "{}").unwrap();
        let nested = dir.path().join("src").join("feature");
        fs::create_dir_all(&nested).unwrap();
        let file = nested.join("app.ts");
        fs::write(&file, "").unwrap();

        assert_eq!(find_tsconfig(&file).unwrap(), tsconfig);
    }

    #[test]
    fn find_tsconfig_without_any_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.ts");
        fs::write(&file, "").unwrap();

        // Only meaningful when nothing above the temp dir carries a tsconfig.json.
        if dir.path().ancestors().skip(1).any(|a| a.join(TSCONFIG).is_file()) {
            return;
        }
        let err = find_tsconfig(&file).unwrap_err();
        assert!(matches!(err, AliasError::NoProjectConfig(_)));
    }

    #[test]
    fn find_tsconfig_picks_nearest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        let pkg = dir.path().join("packages").join("web");
        fs::create_dir_all(&pkg).unwrap();
        let nearest = pkg.join("tsconfig.json");
        fs::write(&nearest, "{}").unwrap();
        let file = pkg.join("main.ts");
        fs::write(&file, "").unwrap();

        assert_eq!(find_tsconfig(&file).unwrap(), nearest);
    }
}
