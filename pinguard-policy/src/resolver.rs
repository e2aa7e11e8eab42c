//! Maps a hostname to the single [`PinningPolicy`] that applies to it.

use crate::host_pattern::{normalize, HostPattern};
use crate::policy::{HostPolicy, PinningPolicy, PolicySet};

/// Resolves `host` against `policy_set`:
///
/// 1. An empty normalized host never resolves.
/// 2. The first `EXACT` pattern that matches wins.
/// 3. Otherwise, among matching `WILDCARD` patterns, the one with the
///    longest suffix wins; ties go to whichever appears first.
/// 4. Otherwise, the policy set's `defaultPolicy`, which may itself be
///    absent.
pub fn resolve<'a>(host: &str, policy_set: &'a PolicySet) -> Option<&'a PinningPolicy> {
    if normalize(host).is_empty() {
        return None;
    }

    if let Some(hp) = policy_set
        .policies
        .iter()
        .find(|hp| matches!(hp.pattern, HostPattern::Exact(_)) && hp.pattern.matches(host))
    {
        return Some(&hp.policy);
    }

    let best_wildcard = policy_set
        .policies
        .iter()
        .filter(|hp| matches!(hp.pattern, HostPattern::Wildcard(_)) && hp.pattern.matches(host))
        .fold(None::<&HostPolicy>, |best, candidate| match best {
            None => Some(candidate),
            Some(current) => {
                if candidate.pattern.wildcard_specificity() > current.pattern.wildcard_specificity() {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        });

    if let Some(hp) = best_wildcard {
        return Some(&hp.policy);
    }

    policy_set.default_policy.as_ref()
}
