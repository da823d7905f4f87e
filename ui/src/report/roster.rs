//! The class roster.
//!
//! A static fallback list ships with the client so the report renders even
//! when the students endpoint is down; live names from the backend are merged
//! on top with the same fuzzy dedupe the grid uses, so a registration with a
//! missing initial does not produce a second row.

pub const CLASS_ROSTER: [&str; 62] = [
    "SANJAY G",
    "SANJAY KUMAR K S",
    "SANJAY KUMAR M",
    "SANJAY RAJ M",
    "SANTHOSH KUMAR S",
    "SARAN KUMAR R",
    "SELVIN JEFRE B",
    "SHACHIN V P",
    "SHAMBUGAMOORTHI K",
    "SHARAN DEV M",
    "SIVA RANJAN R",
    "SIVASARAN K",
    "SIVAHARISH P L",
    "SOLAIRAJAN S",
    "SRI DHARSAN S",
    "SRI VARSHAN S S",
    "SRINIVAS J",
    "SRIRAM S",
    "SUDHARSAN E",
    "SURIYA KUMAR R",
    "TANUSH R",
    "THILAK BABU T A",
    "VENGATA VISVA P S",
    "VIDHYA DHARANESH P",
    "VIGNESH KUMAR S P",
    "VIGNESHWARAN M",
    "VIJAY BALAJI P S",
    "VIJAY KASTHURI K",
    "VIKRAM K",
    "VINUVARSHAN K",
    "VISHAL C",
    "VISHNUSANKAR K",
    "YUVANRAJ A",
    "SAKTHI J",
    "SANDHIYA S",
    "SANKARI M",
    "SANTHIYA L",
    "SANTHIYA S",
    "SARANYA S",
    "SARMATHI M",
    "SASMIKA S M",
    "SATHYA ESWARI K",
    "SERAFINA J B",
    "SHAMIKSAA R J",
    "SHARMITHASRI T",
    "SHEREEN TREESHA A",
    "SHWETHA S M",
    "SIVARANJANI S",
    "SIVASANKARI S",
    "SRI SIVADHARSHINI S",
    "SRILEKA S",
    "SRINIDHI U",
    "SRINITHI B",
    "SUJITHA M",
    "SURYA P",
    "THEJNI S",
    "VALARMATHI M",
    "VASIKA K",
    "VEERALAKSHMI N",
    "VISHWAATHIGA N M",
    "VIYANSA MERCY S",
    "YASWANTHINI M M",
];

pub fn static_roster() -> Vec<String> {
    CLASS_ROSTER.iter().map(|name| name.to_string()).collect()
}

/// Appends backend names not already covered by the static list. A fetched
/// name is a duplicate when it equals an existing entry or when one is a
/// space-separated prefix of the other.
pub fn merge_roster(fetched: &[String]) -> Vec<String> {
    let mut roster = static_roster();
    for name in fetched {
        let upper = name.to_uppercase();
        let known = roster.iter().any(|existing| {
            *existing == upper
                || existing.starts_with(&format!("{upper} "))
                || upper.starts_with(&format!("{existing} "))
        });
        if !known {
            roster.push(upper);
        }
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_roster_has_every_name() {
        let roster = static_roster();
        assert_eq!(roster.len(), 62);
        assert!(roster.contains(&"SANJAY G".to_string()));
        assert!(roster.contains(&"YASWANTHINI M M".to_string()));
    }

    #[test]
    fn merge_skips_prefix_duplicates() {
        let fetched = vec![
            "Sanjay".to_string(),
            "SANJAY G KUMAR".to_string(),
            "BRAND NEW STUDENT".to_string(),
        ];
        let merged = merge_roster(&fetched);

        assert_eq!(merged.len(), 63);
        assert_eq!(merged.last().map(String::as_str), Some("BRAND NEW STUDENT"));
    }

    #[test]
    fn merge_is_case_insensitive() {
        let merged = merge_roster(&["vikram k".to_string()]);
        assert_eq!(merged.len(), 62);
    }
}
