use crate::common::*;

/// Load a class list file with one class name per line.
///
/// Names are trimmed and blank lines are skipped.
pub async fn load_classes_file(path: impl AsRef<Path>) -> Result<IndexSet<String>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read classes file '{}'", path.display()))?;

    let mut classes = IndexSet::new();
    for name in content.lines().map(str::trim) {
        if name.is_empty() {
            continue;
        }
        ensure!(
            classes.insert(name.to_owned()),
            "duplicated class name '{}' in '{}'",
            name,
            path.display()
        );
    }
    ensure!(
        !classes.is_empty(),
        "classes file '{}' contains no class names",
        path.display()
    );
    Ok(classes)
}
