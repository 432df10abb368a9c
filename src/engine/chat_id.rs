// Hookchat Engine — Chat Identifier Generator
//
// Produces readable session ids for telling chat conversations apart.
// Format: AGENT_DDMM_RANDOM, e.g. HRV1_0412_sde4, GAJO_0412_s3ed.
// Readability is favored over uniqueness; collisions are possible and
// operationally irrelevant.

use rand::Rng;

use crate::atoms::constants::CHAT_ID_RANDOM_LEN;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a chat id for the given agent tag. Never fails, never blocks.
pub fn generate(agent_tag: &str) -> String {
    let now = chrono::Local::now();
    let date = now.format("%d%m");

    let mut rng = rand::thread_rng();
    let suffix: String = (0..CHAT_ID_RANDOM_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    format!("{}_{}_{}", agent_tag, date, suffix)
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shape(id: &str, tag: &str) {
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3, "expected TAG_DDMM_RAND, got {}", id);
        assert_eq!(parts[0], tag);
        assert_eq!(parts[1].len(), 4);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn id_matches_expected_shape() {
        assert_shape(&generate("HRV1"), "HRV1");
        assert_shape(&generate("GAJO"), "GAJO");
    }

    #[test]
    fn date_stamp_is_day_then_month() {
        let id = generate("HRV1");
        let now = chrono::Local::now();
        let expected = now.format("%d%m").to_string();
        assert_eq!(id.split('_').nth(1), Some(expected.as_str()));
    }

    #[test]
    fn suffixes_vary_across_calls() {
        // 36^4 possible suffixes; 50 identical draws would mean a broken RNG.
        let suffixes: std::collections::HashSet<String> = (0..50)
            .map(|_| generate("HRV1").split('_').nth(2).unwrap().to_string())
            .collect();
        assert!(suffixes.len() > 1);
    }
}
