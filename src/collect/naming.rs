use std::path::Path;

/// Decides which cohort a vetted file belongs to.
pub trait CohortNamer {
    fn cohort_name(&self, path: &Path) -> String;
}

/// Cohort id is the file name up to its first `.`:
/// `cohortA.vet.tsv` belongs to `cohortA`. Directories are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDotPrefix;

impl CohortNamer for FirstDotPrefix {
    fn cohort_name(&self, path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        name.split('.').next().unwrap_or_default().to_string()
    }
}

impl<F> CohortNamer for F
where
    F: Fn(&Path) -> String,
{
    fn cohort_name(&self, path: &Path) -> String {
        self(path)
    }
}
