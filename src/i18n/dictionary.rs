//! Phrase dictionary: verified translations of short conversational phrases.
//!
//! Consulted before any provider is contacted. A hit is the highest-confidence
//! answer the relay can give and short-circuits all network calls.
//!
//! Both directions of a pair are maintained independently; the hi -> en table
//! is not an inverse of the en -> hi table.

use crate::i18n::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

type PhraseTable = HashMap<&'static str, &'static str>;

/// Static bilingual phrase lookup, keyed by language direction.
pub struct PhraseDictionary {
    tables: HashMap<(Language, Language), PhraseTable>,
}

static DICTIONARY: OnceLock<PhraseDictionary> = OnceLock::new();

impl PhraseDictionary {
    /// Get the global phrase dictionary.
    pub fn get() -> &'static PhraseDictionary {
        DICTIONARY.get_or_init(|| {
            let mut tables = HashMap::new();
            tables.insert((Language::En, Language::Hi), table(EN_HI));
            tables.insert((Language::Hi, Language::En), table(HI_EN));
            PhraseDictionary { tables }
        })
    }

    /// Look up an exact phrase for a language direction.
    ///
    /// The message is trimmed, internal whitespace runs are collapsed to a
    /// single space and the result is lowercased before matching.
    pub fn lookup(&self, message: &str, source: Language, target: Language) -> Option<&'static str> {
        let table = self.tables.get(&(source, target))?;
        table.get(phrase_key(message).as_str()).copied()
    }
}

/// Look up a phrase in the global dictionary.
pub fn lookup(message: &str, source: Language, target: Language) -> Option<&'static str> {
    PhraseDictionary::get().lookup(message, source, target)
}

fn phrase_key(message: &str) -> String {
    message
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn table(entries: &[(&'static str, &'static str)]) -> PhraseTable {
    entries.iter().copied().collect()
}

const EN_HI: &[(&str, &str)] = &[
    // Greetings
    ("hello", "नमस्ते"),
    ("hi", "नमस्ते"),
    ("hey", "नमस्ते"),
    ("good morning", "शुभ प्रभात"),
    ("good afternoon", "शुभ अपराह्न"),
    ("good evening", "शुभ संध्या"),
    ("good night", "शुभ रात्रि"),
    // Common questions
    ("how are you", "आप कैसे हैं?"),
    ("how are you doing", "आप कैसे हैं?"),
    ("what's up", "क्या हाल है?"),
    ("what is your name", "आपका नाम क्या है?"),
    ("where are you from", "आप कहाँ से हैं?"),
    ("how old are you", "आपकी उम्र क्या है?"),
    // Responses
    ("i am fine", "मैं ठीक हूँ"),
    ("i'm good", "मैं ठीक हूँ"),
    ("i'm okay", "मैं ठीक हूँ"),
    ("thank you", "धन्यवाद"),
    ("thanks", "धन्यवाद"),
    ("you're welcome", "आपका स्वागत है"),
    ("sorry", "माफ़ कीजिए"),
    ("excuse me", "माफ़ कीजिए"),
    ("please", "कृपया"),
    // Basic words
    ("yes", "हाँ"),
    ("no", "नहीं"),
    ("okay", "ठीक है"),
    ("ok", "ठीक है"),
    ("maybe", "शायद"),
    // Questions
    ("what is this", "यह क्या है?"),
    ("what is that", "वह क्या है?"),
    ("who is this", "यह कौन है?"),
    ("where is it", "यह कहाँ है?"),
    ("when is it", "यह कब है?"),
    ("why is it", "यह क्यों है?"),
    ("how is it", "यह कैसा है?"),
    ("what time is it", "क्या समय हुआ है?"),
    ("what is the time", "समय क्या है?"),
    // Food and help
    ("i am hungry", "मुझे भूख लगी है"),
    ("food", "खाना"),
    ("water", "पानी"),
    ("help", "मदद"),
    ("i need help", "मुझे मदद चाहिए"),
    ("can you help me", "क्या आप मेरी मदद कर सकते हैं?"),
    ("where is the bathroom", "बाथरूम कहाँ है?"),
    ("where is the hotel", "होटल कहाँ है?"),
    // Feelings
    ("i love you", "मैं तुमसे प्यार करता हूँ"),
    ("i like you", "मुझे तुम पसंद हो"),
    ("i am happy", "मैं खुश हूँ"),
    ("i am sad", "मैं उदास हूँ"),
    // Work and study
    ("what do you do", "आप क्या करते हैं?"),
    ("i am a student", "मैं एक छात्र हूँ"),
    ("i am working", "मैं काम कर रहा हूँ"),
];

const HI_EN: &[(&str, &str)] = &[
    // Greetings
    ("नमस्ते", "Hello"),
    ("नमस्कार", "Hello"),
    ("प्रणाम", "Greetings"),
    ("शुभ प्रभात", "Good morning"),
    ("शुभ संध्या", "Good evening"),
    ("शुभ रात्रि", "Good night"),
    // Common phrases
    ("आप कैसे हैं", "How are you?"),
    ("आप कैसे हो", "How are you?"),
    ("कैसे हो", "How are you?"),
    ("क्या हाल है", "What's up?"),
    ("का हाल है", "How are you?"),
    ("आपका नाम क्या है", "What is your name?"),
    ("आप कहाँ से हैं", "Where are you from?"),
    // Responses
    ("मैं ठीक हूँ", "I am fine"),
    ("धन्यवाद", "Thank you"),
    ("शुक्रिया", "Thanks"),
    ("कृपया", "Please"),
    ("माफ़ कीजिए", "Sorry"),
    ("क्षमा कीजिए", "Excuse me"),
    // Basic words
    ("हाँ", "Yes"),
    ("नहीं", "No"),
    ("ठीक है", "Okay"),
    ("शायद", "Maybe"),
    // Questions
    ("यह क्या है", "What is this?"),
    ("वह क्या है", "What is that?"),
    ("यह कौन है", "Who is this?"),
    ("यह कहाँ है", "Where is it?"),
    ("यह कब है", "When is it?"),
    ("यह क्यों है", "Why is it?"),
    ("क्या कर रहे हो", "What are you doing?"),
    ("खाना खा लिया", "Have you eaten?"),
    ("कहाँ जा रहे हो", "Where are you going?"),
    ("क्या समय हुआ है", "What time is it?"),
    ("मुझे मदद चाहिए", "I need help"),
    ("पानी दीजिए", "Please give me water"),
    ("यह कितने का है", "How much is this?"),
    ("बाथरूम कहाँ है", "Where is the bathroom?"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_en_hi() {
        assert_eq!(lookup("hello", Language::En, Language::Hi), Some("नमस्ते"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            lookup("  Good   MORNING ", Language::En, Language::Hi),
            Some("शुभ प्रभात")
        );
        assert_eq!(
            lookup("आप  कैसे   हैं", Language::Hi, Language::En),
            Some("How are you?")
        );
    }

    #[test]
    fn test_exact_match_only() {
        assert_eq!(lookup("hello there", Language::En, Language::Hi), None);
        assert_eq!(lookup("hell", Language::En, Language::Hi), None);
        assert_eq!(lookup("how are you?", Language::En, Language::Hi), None);
    }

    #[test]
    fn test_direction_matters() {
        assert_eq!(lookup("hello", Language::Hi, Language::En), None);
        assert_eq!(lookup("नमस्ते", Language::En, Language::Hi), None);
        assert_eq!(lookup("नमस्ते", Language::Hi, Language::En), Some("Hello"));
    }

    #[test]
    fn test_uncovered_pairs_miss() {
        let dictionary = PhraseDictionary::get();
        assert!(!dictionary.tables.contains_key(&(Language::En, Language::Fr)));
        assert_eq!(lookup("hello", Language::En, Language::Fr), None);
    }

    #[test]
    fn test_tables_are_populated() {
        let dictionary = PhraseDictionary::get();
        assert_eq!(dictionary.tables[&(Language::En, Language::Hi)].len(), EN_HI.len());
        assert_eq!(dictionary.tables[&(Language::Hi, Language::En)].len(), HI_EN.len());
    }

    #[test]
    fn test_english_keys_are_stored_lowercase() {
        for (key, _) in EN_HI {
            assert_eq!(*key, phrase_key(key), "key {:?} would never match", key);
        }
        for (key, _) in HI_EN {
            assert_eq!(*key, phrase_key(key), "key {:?} would never match", key);
        }
    }
}
