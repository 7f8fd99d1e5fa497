//! Column names and fixed column layouts of every table the run touches.

pub const SYMBOL: &str = "SYMBOL";
pub const TRANSCRIPT: &str = "TRANSCRIPT";
pub const COHORT: &str = "COHORT";
pub const CANCER_TYPE: &str = "CANCER_TYPE";
pub const SAMPLES: &str = "SAMPLES";
pub const MUTATIONS: &str = "MUTATIONS";

/// Cohort sample count once attached to a per-gene row.
pub const SAMPLES_COHORT: &str = "SAMPLES_COHORT";
pub const SAMPLE_FRACTION: &str = "%_SAMPLES_COHORT";

/// Columns the cohort table must carry.
pub const COHORT_INPUT: &[&str] = &[COHORT, CANCER_TYPE, SAMPLES];

/// Columns the raw mutation table must carry.
pub const MUTATION_INPUT: &[&str] = &[TRANSCRIPT, SYMBOL, COHORT, SAMPLES];

/// Columns every per-cohort driver-candidate file must carry.
pub const DRIVER_INPUT: &[&str] = &[
    SYMBOL,
    TRANSCRIPT,
    COHORT,
    "METHODS",
    SAMPLES,
    "QVALUE_COMBINATION",
    "ROLE",
    "CGC_GENE",
    "CGC_CANCER_GENE",
    "DOMAIN",
    "2D_CLUSTERS",
    "3D_CLUSTERS",
    "EXCESS_MIS",
    "EXCESS_NON",
    "EXCESS_SPL",
];

/// Columns every per-cohort vetted file must carry. The cohort column is
/// derived from the file name and is not required here.
pub const VETTED_INPUT: &[&str] = &[
    SYMBOL,
    TRANSCRIPT,
    "ALL_METHODS",
    "SIG_METHODS",
    "QVALUE_COMBINATION",
    "QVALUE_CGC_COMBINATION",
    "RANKING",
    "TIER",
    "ROLE",
    "CGC_GENE",
    "TIER_CGC",
    "CGC_CANCER_GENE",
    "SIGNATURE9",
    "SIGNATURE10",
    "WARNING_EXPRESSION",
    "WARNING_GERMLINE",
    "SAMPLES_3MUTS",
    "OR_WARNING",
    "WARNING_ARTIFACT",
    "KNOWN_ARTIFACT",
    "NUM_PAPERS",
    "WARNING_ENSEMBL_TRANSCRIPTS",
    "DRIVER",
    "FILTER",
];

/// Layout of `drivers.tsv`.
pub const DRIVER_OUTPUT: [&str; 18] = [
    SYMBOL,
    TRANSCRIPT,
    COHORT,
    CANCER_TYPE,
    "METHODS",
    MUTATIONS,
    SAMPLES,
    SAMPLE_FRACTION,
    "QVALUE_COMBINATION",
    "ROLE",
    "CGC_GENE",
    "CGC_CANCER_GENE",
    "DOMAIN",
    "2D_CLUSTERS",
    "3D_CLUSTERS",
    "EXCESS_MIS",
    "EXCESS_NON",
    "EXCESS_SPL",
];

/// Layout of `unfiltered_drivers.tsv`.
pub const VETTED_OUTPUT: [&str; 28] = [
    SYMBOL,
    TRANSCRIPT,
    COHORT,
    CANCER_TYPE,
    MUTATIONS,
    SAMPLES_COHORT,
    "ALL_METHODS",
    "SIG_METHODS",
    "QVALUE_COMBINATION",
    "QVALUE_CGC_COMBINATION",
    "RANKING",
    "TIER",
    "ROLE",
    "CGC_GENE",
    "TIER_CGC",
    "CGC_CANCER_GENE",
    "SIGNATURE9",
    "SIGNATURE10",
    "WARNING_EXPRESSION",
    "WARNING_GERMLINE",
    "SAMPLES_3MUTS",
    "OR_WARNING",
    "WARNING_ARTIFACT",
    "KNOWN_ARTIFACT",
    "NUM_PAPERS",
    "WARNING_ENSEMBL_TRANSCRIPTS",
    "DRIVER",
    "FILTER",
];

/// Both reports are ordered by these columns.
pub const REPORT_SORT: &[&str] = &[SYMBOL, CANCER_TYPE];
