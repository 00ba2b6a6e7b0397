use std::collections::BTreeSet;
use std::{ fs, path::Path, path::PathBuf };
use serde_json::{ Value, Map };
use anyhow::{ Context, Result };

#[path = "src/unique_map.rs"]
mod unique_map;

use unique_map::UniqueMap;

// Locales the library can represent; keep in sync with `LanguageTag`.
const SUPPORTED_LOCALES: [&str; 2] = ["en_US", "zh_CN"];

fn main() -> Result<()> {
    let messages_dir = find_messages_directory()?;
    let out_path = Path::new(&std::env::var("OUT_DIR")?).join("all_translations.json");

    println!("cargo:rerun-if-env-changed=RPD_INTL_MESSAGES_DIR");
    println!("cargo:rerun-if-changed={}", messages_dir.display());

    // Always create the file so include_str! works; the library treats an
    // empty bundle as "no translations" and falls back to source phrases.
    if !messages_dir.exists() {
        println!("cargo:warning=No messages/ folder found at {}", messages_dir.display());
        fs::write(out_path, "{}")?;
        return Ok(());
    }

    let translations = build_translations(&messages_dir)?;
    report_coverage(&translations);
    fs::write(out_path, serde_json::to_string_pretty(&translations)?)?;
    Ok(())
}

fn build_translations(messages_dir: &Path) -> Result<Value> {
    let mut translations = Map::new();

    let mut lang_dirs = fs::read_dir(messages_dir)?.collect::<Result<Vec<_>, _>>()?;
    lang_dirs.sort_by_key(|entry| entry.file_name());

    for lang_dir in lang_dirs {
        if !lang_dir.file_type()?.is_dir() {
            continue;
        }

        let lang_code = lang_dir.file_name().to_string_lossy().to_string();
        let mut contexts = Map::new();

        let mut files = fs::read_dir(lang_dir.path())?.collect::<Result<Vec<_>, _>>()?;
        files.sort_by_key(|entry| entry.file_name());

        for file in files {
            let file_path = file.path();
            println!("cargo:rerun-if-changed={}", file_path.display());

            if let Some("json") = file_path.extension().and_then(|e| e.to_str()) {
                let context = file_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");

                let content = fs::read_to_string(&file_path)
                    .with_context(|| format!("reading {}", file_path.display()))?;
                contexts.insert(context.to_string(), read_phrases(&content, &file_path)?);
            }
        }
        translations.insert(lang_code, Value::Object(contexts));
    }

    Ok(Value::Object(translations))
}

// Catalog files map source phrase -> translated phrase: nothing nested, no
// phrase listed twice.
fn read_phrases(content: &str, path: &Path) -> Result<Value> {
    let UniqueMap(phrases) = serde_json::from_str::<UniqueMap<String>>(content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(
        Value::Object(
            phrases
                .into_iter()
                .map(|(source, translation)| (source, Value::String(translation)))
                .collect()
        )
    )
}

fn report_coverage(translations: &Value) {
    let Some(langs) = translations.as_object() else {
        return;
    };

    let keys_of = |files: &Value| -> BTreeSet<(String, String)> {
        files
            .as_object()
            .into_iter()
            .flatten()
            .flat_map(|(context, phrases)| {
                phrases
                    .as_object()
                    .into_iter()
                    .flatten()
                    .map(move |(source, _)| (context.clone(), source.clone()))
            })
            .collect()
    };

    for locale in SUPPORTED_LOCALES {
        if !langs.contains_key(locale) {
            println!("cargo:warning=No catalog folder for {locale}; its lookups will fail at runtime");
        }
    }

    let all: BTreeSet<(String, String)> = langs.values().flat_map(keys_of).collect();
    for (lang, files) in langs {
        for (context, source) in all.difference(&keys_of(files)) {
            println!("cargo:warning={lang} is missing '{source}' in context {context}");
        }
    }
}

fn find_messages_directory() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("RPD_INTL_MESSAGES_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")?;
    Ok(Path::new(&manifest_dir).join("messages"))
}
