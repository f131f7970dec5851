//! Resource identity: the Group/Version/Kind/domain tuple and every name the
//! generators derive from it.
//!
//! All derived values are computed once in [`ResourceIdentity::new`] and
//! cached; the value is immutable afterwards.

use serde::Serialize;
use std::fmt;

use crate::domain::error::DomainError;

/// Longest permitted DNS label (`group` and `domain` are dot-separated labels).
pub const MAX_LABEL_LEN: usize = 63;

/// Longest permitted `group.domain` (DNS subdomain limit).
pub const MAX_GROUP_DOMAIN_LEN: usize = 253;

/// A validated Group/Version/Kind in a project domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceIdentity {
    group: String,
    version: String,
    kind: String,
    domain: String,

    kind_lower: String,
    plural: String,
    group_domain: String,
    dashed_group_domain: String,
    import_alias: String,
}

impl ResourceIdentity {
    /// Validate the raw fields and derive every name from them.
    ///
    /// # Errors
    ///
    /// `InvalidIdentity` naming the offending field when `kind` is empty or not
    /// an exported identifier, `version` does not look like `v1`/`v1beta1`, or
    /// `group`/`domain` would not be usable as a URL path segment.
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
        domain: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let group = group.into();
        let version = version.into();
        let kind = kind.into();
        let domain = domain.into();

        validate_kind(&kind)?;
        validate_version(&version)?;
        validate_dns_name("group", &group)?;
        validate_dns_name("domain", &domain)?;

        let group_domain = format!("{group}.{domain}");
        if group_domain.len() > MAX_GROUP_DOMAIN_LEN {
            return Err(DomainError::invalid(
                "group",
                &group_domain,
                format!("group and domain together exceed {MAX_GROUP_DOMAIN_LEN} characters"),
            ));
        }

        let dashed_group_domain = group_domain.replace('.', "-");
        if dashed_group_domain.contains('.') {
            return Err(DomainError::invalid(
                "domain",
                &group_domain,
                "dashed group domain still contains '.'",
            ));
        }

        let kind_lower = kind.to_lowercase();
        let plural = pluralize(&kind_lower);
        let import_alias = format!(
            "{}{}",
            group.replace(['.', '-'], ""),
            version
        );

        Ok(Self {
            group,
            version,
            kind,
            domain,
            kind_lower,
            plural,
            group_domain,
            dashed_group_domain,
            import_alias,
        })
    }

    /// Replace the derived plural with a caller-supplied one, used verbatim.
    pub fn with_plural(mut self, plural: impl Into<String>) -> Result<Self, DomainError> {
        let plural = plural.into();
        if plural.trim().is_empty() {
            return Err(DomainError::invalid("plural", plural, "cannot be empty"));
        }
        self.plural = plural;
        Ok(self)
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn kind_lower(&self) -> &str {
        &self.kind_lower
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// `group.domain`, e.g. `batch.tutorial.io`.
    pub fn group_domain(&self) -> &str {
        &self.group_domain
    }

    /// `group-domain` with every `.` replaced by `-`, e.g. `batch-tutorial-io`.
    pub fn dashed_group_domain(&self) -> &str {
        &self.dashed_group_domain
    }

    /// Go import alias for the API package, e.g. `batchv1`.
    pub fn import_alias(&self) -> &str {
        &self.import_alias
    }

    /// Package directory relative to the API root: `<group>/<version>`.
    pub fn package_path(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }

    /// Path of the mutating webhook endpoint.
    pub fn mutating_webhook_path(&self) -> String {
        format!(
            "/mutate-{}-{}-{}",
            self.dashed_group_domain, self.version, self.kind_lower
        )
    }

    /// Path of the validating webhook endpoint.
    pub fn validating_webhook_path(&self) -> String {
        format!(
            "/validate-{}-{}-{}",
            self.dashed_group_domain, self.version, self.kind_lower
        )
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group_domain, self.version, self.kind)
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_kind(kind: &str) -> Result<(), DomainError> {
    let mut chars = kind.chars();
    match chars.next() {
        None => Err(DomainError::invalid("kind", kind, "cannot be empty")),
        Some(first) if !first.is_ascii_uppercase() => Err(DomainError::invalid(
            "kind",
            kind,
            "must start with an uppercase ASCII letter",
        )),
        Some(_) if !chars.all(|c| c.is_ascii_alphanumeric()) => Err(DomainError::invalid(
            "kind",
            kind,
            "may only contain ASCII letters and digits",
        )),
        Some(_) => Ok(()),
    }
}

/// Accepts `v<N>` optionally followed by `alpha<N>` or `beta<N>`, where `<N>`
/// is a positive integer without leading zeros.
fn validate_version(version: &str) -> Result<(), DomainError> {
    let reject = |reason: &str| Err(DomainError::invalid("version", version, reason));

    let Some(rest) = version.strip_prefix('v') else {
        return reject("must start with 'v'");
    };

    let (major, rest) = split_number(rest);
    if !is_positive_number(major) {
        return reject("must have a positive major version after 'v'");
    }
    if rest.is_empty() {
        return Ok(());
    }

    let stage = rest
        .strip_prefix("alpha")
        .or_else(|| rest.strip_prefix("beta"));
    match stage {
        Some(n) if is_positive_number(n) => Ok(()),
        Some(_) => reject("alpha/beta must be followed by a positive number"),
        None => reject("only 'alpha' or 'beta' may follow the major version"),
    }
}

fn split_number(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn is_positive_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) && !s.starts_with('0')
}

fn validate_dns_name(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::invalid(field, value, "cannot be empty"));
    }
    for label in value.split('.') {
        if label.is_empty() {
            return Err(DomainError::invalid(field, value, "contains an empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::invalid(
                field,
                value,
                format!("label '{label}' is longer than {MAX_LABEL_LEN} characters"),
            ));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::invalid(
                field,
                value,
                "only lowercase letters, digits, '-' and '.' are allowed",
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainError::invalid(
                field,
                value,
                "labels cannot start or end with '-'",
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Pluralization
// ============================================================================

/// Words whose plural is the word itself.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// Whole-word irregular plurals.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Deterministic English pluralization of an already-lowercased kind.
///
/// ## Rules
///
/// 1. Uncountable and irregular words are looked up as whole words
/// 2. `s`, `x`, `z`, `ch`, `sh` endings take `es`
/// 3. consonant + `y` becomes `ies`
/// 4. everything else takes `s`
///
/// ## Limitations
///
/// Kinds are matched as a single lowercased word, so compound kinds such as
/// `FirstPerson` are not recognised as irregular (`firstpersons`). Words ending
/// in `-f`/`-fe`/`-o` and Latin/Greek plurals follow rule 4. Callers that
/// need a different plural pass it explicitly through
/// [`ResourceIdentity::with_plural`].
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|end| word.ends_with(end)) {
        return format!("{word}es");
    }

    if let Some(stem) = word.strip_suffix('y') {
        let before_y = stem.chars().last();
        if before_y.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cronjob() -> ResourceIdentity {
        ResourceIdentity::new("batch", "v1", "CronJob", "tutorial.io").unwrap()
    }

    #[test]
    fn derives_names_from_gvk() {
        let res = cronjob();
        assert_eq!(res.kind_lower(), "cronjob");
        assert_eq!(res.plural(), "cronjobs");
        assert_eq!(res.group_domain(), "batch.tutorial.io");
        assert_eq!(res.dashed_group_domain(), "batch-tutorial-io");
        assert_eq!(res.import_alias(), "batchv1");
        assert_eq!(res.package_path(), "batch/v1");
        assert_eq!(
            res.mutating_webhook_path(),
            "/mutate-batch-tutorial-io-v1-cronjob"
        );
        assert_eq!(
            res.validating_webhook_path(),
            "/validate-batch-tutorial-io-v1-cronjob"
        );
    }

    #[test]
    fn construction_is_deterministic() {
        assert_eq!(cronjob(), cronjob());
    }

    #[test]
    fn explicit_plural_wins_verbatim() {
        let res = cronjob().with_plural("CronJobz").unwrap();
        assert_eq!(res.plural(), "CronJobz");
        assert!(cronjob().with_plural("  ").is_err());
    }

    #[test]
    fn empty_kind_is_rejected() {
        let err = ResourceIdentity::new("batch", "v1", "", "tutorial.io").unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentity { field: "kind", .. }));
    }

    #[test]
    fn lowercase_or_punctuated_kind_is_rejected() {
        assert!(ResourceIdentity::new("batch", "v1", "cronJob", "tutorial.io").is_err());
        assert!(ResourceIdentity::new("batch", "v1", "Cron-Job", "tutorial.io").is_err());
    }

    #[test]
    fn version_pattern() {
        for ok in ["v1", "v12", "v1beta1", "v2alpha3", "v10beta20"] {
            assert!(validate_version(ok).is_ok(), "{ok} should be accepted");
        }
        for bad in ["1", "v", "v0", "v01", "v1beta", "v1gamma1", "v1beta0", "V1", "v1-beta1"] {
            assert!(validate_version(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn group_and_domain_must_be_path_safe() {
        assert!(ResourceIdentity::new("Batch", "v1", "CronJob", "tutorial.io").is_err());
        assert!(ResourceIdentity::new("batch", "v1", "CronJob", "tutorial/io").is_err());
        assert!(ResourceIdentity::new("batch", "v1", "CronJob", "tutorial..io").is_err());
        assert!(ResourceIdentity::new("-batch", "v1", "CronJob", "tutorial.io").is_err());
        assert!(ResourceIdentity::new("", "v1", "CronJob", "tutorial.io").is_err());
    }

    #[test]
    fn overlong_group_domain_is_rejected() {
        let long_label = "a".repeat(MAX_LABEL_LEN + 1);
        let err = ResourceIdentity::new(long_label, "v1", "CronJob", "tutorial.io").unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentity { field: "group", .. }));

        let label = "a".repeat(MAX_LABEL_LEN);
        let domain = [label.as_str(); 4].join(".");
        let err = ResourceIdentity::new("batch", "v1", "CronJob", domain).unwrap_err();
        assert!(err.to_string().contains("exceed"));
    }

    #[test]
    fn dashed_group_domain_has_no_dots() {
        let res = ResourceIdentity::new("crew.ship", "v1", "FirstMate", "example.com").unwrap();
        assert_eq!(res.dashed_group_domain(), "crew-ship-example-com");
        assert_eq!(res.import_alias(), "crewshipv1");
    }

    #[test]
    fn pluralization_rules() {
        assert_eq!(pluralize("cronjob"), "cronjobs");
        assert_eq!(pluralize("ingress"), "ingresses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("policy"), "policies");
        assert_eq!(pluralize("gateway"), "gateways");
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("kraken"), "krakens");
    }
}
