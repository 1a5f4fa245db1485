//! Spoken-name normalization.
//!
//! Voice recognition mangles station names in predictable ways: "Wiehle"
//! arrives as "willy", "NoMa" as "know my", landmarks stand in for the
//! stations that serve them. `essentialize` rewrites such text to a short
//! canonical form that the directory's substring lookup will hit.
//!
//! The table is an ordered list of rules evaluated strictly in sequence
//! against the *current* value: once a rule rewrites, later rules see the
//! rewritten text, not the original. A phrase containing several triggers is
//! therefore decided by the first matching rule, and a later rule can in
//! principle override an earlier rewrite. Callers rely on this precedence;
//! do not convert the table into a single longest-match dictionary.

/// How a rule's trigger phrases are compared against the input.
enum Trigger {
    /// Fires when any phrase appears as a substring.
    Contains(&'static [&'static str]),
    /// Fires when the whole input equals one of the phrases.
    Equals(&'static [&'static str]),
}

/// One rewrite rule: trigger phrases and the canonical replacement.
struct Rule {
    trigger: Trigger,
    replacement: &'static str,
}

impl Rule {
    fn fires(&self, lower: &str) -> bool {
        match self.trigger {
            Trigger::Contains(phrases) => phrases.iter().any(|p| lower.contains(p)),
            Trigger::Equals(phrases) => phrases.iter().any(|p| *p == lower),
        }
    }
}

const fn contains(phrases: &'static [&'static str], replacement: &'static str) -> Rule {
    Rule {
        trigger: Trigger::Contains(phrases),
        replacement,
    }
}

/// The rewrite table, in evaluation order.
///
/// Every replacement is a fixed point of the whole table, which makes
/// `essentialize` idempotent.
const RULES: &[Rule] = &[
    contains(&["gallery", "china"], "gallery"),
    contains(&["king st"], "old town"),
    contains(&["vernon"], "vernon"),
    contains(&["willy"], "wiehle-reston east"),
    contains(&["stadium", "armory"], "stadium-armory"),
    contains(&["franconia", "springfield"], "franconia-springfield"),
    contains(&["african", "you street"], "u street"),
    contains(&["maryland"], "college park"),
    contains(&["navy yard", "baseball", "nats park"], "navy yard"),
    contains(&["howard"], "howard"),
    contains(&["prince"], "prince"),
    contains(&["university of virginia", "virginia tech"], "west falls church"),
    contains(&["american university"], "tenleytown"),
    contains(&["grosvenor"], "grosvenor"),
    contains(&["catholic"], "brookland"),
    contains(&["gallaudet"], "noma"),
    contains(&["georgia ave"], "petworth"),
    contains(&["minnesota"], "minnesota"),
    contains(&["potomac"], "potomac"),
    contains(&["branch"], "branch"),
    contains(&["rhode"], "rhode island"),
    contains(&["zoo"], "zoo"),
    contains(&["verizon"], "gallery"),
    contains(&["national mall"], "smithsonian"),
    contains(&["dallas"], "dulles"),
    contains(&["airport"], "airport"),
    Rule {
        trigger: Trigger::Equals(&["know my", "number", "know muh", "no my", "know much"]),
        replacement: "noma",
    },
];

/// Normalize a spoken station name to its canonical short form.
///
/// Input that triggers no rule is returned unchanged.
pub fn essentialize(raw: &str) -> String {
    let mut current = raw.to_string();
    for rule in RULES {
        if rule.fires(&current.to_lowercase()) {
            current = rule.replacement.to_string();
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_mishearings() {
        assert_eq!(essentialize("willy reston"), "wiehle-reston east");
        assert_eq!(essentialize("know my"), "noma");
        assert_eq!(essentialize("number"), "noma");
        assert_eq!(essentialize("gallaudet university"), "noma");
        assert_eq!(essentialize("china town"), "gallery");
        assert_eq!(essentialize("verizon center"), "gallery");
        assert_eq!(essentialize("king street"), "old town");
        assert_eq!(essentialize("mount vernon square"), "vernon");
    }

    #[test]
    fn landmark_aliases() {
        assert_eq!(essentialize("nats park"), "navy yard");
        assert_eq!(essentialize("the national mall"), "smithsonian");
        assert_eq!(essentialize("american university"), "tenleytown");
        assert_eq!(essentialize("catholic university"), "brookland");
        assert_eq!(essentialize("virginia tech campus"), "west falls church");
        assert_eq!(essentialize("the zoo"), "zoo");
    }

    #[test]
    fn untouched_input_passes_through() {
        assert_eq!(essentialize("Metro Center"), "Metro Center");
        assert_eq!(essentialize("rosslyn"), "rosslyn");
        assert_eq!(essentialize(""), "");
    }

    #[test]
    fn armory_alone_triggers_the_stadium_rule() {
        assert_eq!(essentialize("the armory"), "stadium-armory");
        assert_eq!(essentialize("stadium"), "stadium-armory");
    }

    #[test]
    fn first_matching_rule_wins_over_later_triggers() {
        // Contains both "maryland" (rule earlier in the table) and "prince"
        // (later). The earlier rule rewrites first and the later rule no
        // longer sees its trigger.
        assert_eq!(essentialize("prince george's county maryland"), "college park");
        // Without "maryland" present the "prince" rule fires normally.
        assert_eq!(essentialize("prince george's plaza"), "prince");
    }

    #[test]
    fn exact_noma_rules_do_not_fire_on_substrings() {
        // "number" only rewrites when it is the whole utterance.
        assert_eq!(essentialize("number one station"), "number one station");
        assert_eq!(essentialize("number"), "noma");
    }

    #[test]
    fn replacements_are_fixed_points() {
        for rule in super::RULES {
            let replacement = rule.replacement;
            assert_eq!(
                essentialize(replacement),
                replacement,
                "replacement {replacement:?} must survive the whole table"
            );
        }
    }
}
