use std::path::Path;

use verdant_core::options::error::OptionsError;
use verdant_core::{
    ComponentOptions, Document, Error, FileFormat, MountTarget, Result, Runtime, RuntimeConfig,
    TemplateCompiler,
};

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|source| {
        OptionsError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn format_of(path: &Path) -> Result<FileFormat> {
    FileFormat::from_path(path)
        .ok_or_else(|| OptionsError::UnsupportedFormat(path.to_path_buf()).into())
}

async fn load_options(path: &Path) -> Result<ComponentOptions> {
    let format = format_of(path)?;
    let data = read_file(path).await?;
    Ok(ComponentOptions::from_str_format(&data, format)?)
}

/// Create the component described by `options_path` inside the document
/// and return the document's HTML.
pub async fn render(
    options_path: &Path,
    document_path: &Path,
    target: Option<String>,
    config_path: Option<&Path>,
) -> Result<String> {
    let config = match config_path {
        Some(path) => {
            let format = format_of(path)?;
            RuntimeConfig::from_str_format(&read_file(path).await?, format)?
        }
        None => RuntimeConfig::default(),
    };
    let options = load_options(options_path).await?;
    let mut doc = Document::parse(&read_file(document_path).await?)?;

    let target = match target.map(MountTarget::from).or_else(|| options.el.clone()) {
        Some(target) => target,
        None => {
            return Err(Error::Other(format!(
                "{} has no mount target; pass --target or set `el`",
                options_path.display()
            )));
        }
    };

    let runtime = Runtime::builder().config(config).build();
    let mut vm = runtime.construct(&runtime.root(), options)?;
    runtime.mount(&mut vm, target, &mut doc)?;
    log::info!("Rendered {} into {}", vm.name(), document_path.display());
    Ok(doc.to_html())
}

/// Compile the template of the options file and of each nested component.
/// Returns one report line per checked component.
pub async fn check(options_path: &Path) -> Result<Vec<String>> {
    let options = load_options(options_path).await?;
    let runtime = Runtime::new();
    let compiler = runtime.resolver().compiler();

    let mut report = Vec::new();
    let mut pending = vec![(options.display_name().to_string(), options)];
    while let Some((name, options)) = pending.pop() {
        for child in options.components.own_names() {
            if let Some(def) = options.components.get(&child) {
                pending.push((child.clone(), def.as_ref().clone()));
            }
        }
        match options.template.as_deref() {
            Some(template) if !template.is_empty() => {
                compiler.compile(template).map_err(|e| {
                    Error::Other(format!("{}: {}", name, e))
                })?;
                report.push(format!("{}: ok", name));
            }
            _ => report.push(format!("{}: no template", name)),
        }
    }
    Ok(report)
}
