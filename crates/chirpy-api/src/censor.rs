/// Words masked out of chirp bodies before storage. Matching is
/// case-insensitive but whole-word only: punctuation stuck to a word keeps
/// it out of reach, same as the reference behavior.
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const MASK: &str = "****";

pub fn censor(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_profane_words_case_insensitively() {
        assert_eq!(censor("This is a Kerfuffle"), "This is a ****");
        assert_eq!(
            censor("kerfuffle SHARBERT Fornax"),
            "**** **** ****"
        );
    }

    #[test]
    fn clean_text_passes_through() {
        let body = "I hear Mastodon is better than Chirpy";
        assert_eq!(censor(body), body);
    }

    #[test]
    fn punctuation_defeats_the_mask() {
        // Whole-word matching only: "Sharbert!" is not "sharbert".
        assert_eq!(censor("Sharbert!"), "Sharbert!");
    }

    #[test]
    fn substrings_are_left_alone() {
        assert_eq!(censor("kerfuffles everywhere"), "kerfuffles everywhere");
    }

    #[test]
    fn empty_body_is_fine() {
        assert_eq!(censor(""), "");
    }
}
