// rhyme.rs
use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Romanization scheme a syllable string is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Pinyin with trailing tone digits, e.g. `zhong1`.
    Mandarin,
    /// Jyutping with tone digits 1-6, e.g. `gwok3`.
    Cantonese,
    /// Tupa romanization of Middle Chinese, tone letters `q`/`h`.
    MiddleChinese,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Mandarin, Scheme::Cantonese, Scheme::MiddleChinese];

    /// Short language tag used in the corpus and on the command line.
    pub fn code(self) -> &'static str {
        match self {
            Scheme::Mandarin => "cmn",
            Scheme::Cantonese => "yue",
            Scheme::MiddleChinese => "lzt",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cmn" | "mandarin" => Ok(Scheme::Mandarin),
            "yue" | "cantonese" => Ok(Scheme::Cantonese),
            "lzt" | "middle-chinese" | "tupa" => Ok(Scheme::MiddleChinese),
            other => Err(format!("unknown scheme: {other}")),
        }
    }
}

// Alternatives are listed longest-first; the regex engine takes the first
// alternative that matches, so `zh` wins over `z`.
static CMN_TONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static CMN_INITIAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(zh|ch|sh|b|p|m|f|d|t|n|l|g|k|h|j|q|x|r|z|c|s|y|w)").unwrap()
});

static YUE_TONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[1-6]").unwrap());
static YUE_INITIAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(gw|kw|ng|b|p|m|f|d|t|n|l|g|k|h|w|z|c|s|j)").unwrap()
});

static LZT_TONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[qh]$").unwrap());
static LZT_RHYME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]+.*").unwrap());
// Glides are only dropped when a vowel follows; the lookahead needs fancy_regex.
static LZT_GLIDE_REGEX: Lazy<fancy_regex::Regex> =
    Lazy::new(|| fancy_regex::Regex::new(r"^[iuy]+(?=[aeiouy])").unwrap());

/// Extracts the rhyme final of `pronunciation` in the given scheme.
///
/// Never fails: empty input yields an empty string, and an internal matching
/// error is logged and yields an empty string as well.
pub fn get_rhyme_final(pronunciation: &str, scheme: Scheme) -> String {
    if pronunciation.is_empty() {
        return String::new();
    }
    match try_rhyme_final(pronunciation, scheme) {
        Ok(rhyme) => rhyme,
        Err(e) => {
            debug!("rhyme extraction failed for {pronunciation:?} ({scheme}): {e}");
            String::new()
        }
    }
}

fn try_rhyme_final(pronunciation: &str, scheme: Scheme) -> Result<String> {
    let s = pronunciation.trim().to_lowercase();
    match scheme {
        Scheme::Mandarin => {
            let s = CMN_TONE_REGEX.replace_all(&s, "");
            Ok(CMN_INITIAL_REGEX.replace(&s, "").into_owned())
        }
        Scheme::Cantonese => {
            let s = YUE_TONE_REGEX.replace_all(&s, "");
            Ok(YUE_INITIAL_REGEX.replace(&s, "").into_owned())
        }
        Scheme::MiddleChinese => middle_chinese_final(&s),
    }
}

fn middle_chinese_final(s: &str) -> Result<String> {
    let s = LZT_TONE_REGEX.replace(s, "");
    let Some(rhyme) = LZT_RHYME_REGEX.find(&s) else {
        return Ok(s.to_string());
    };
    let rhyme = rhyme.as_str();
    let glide = LZT_GLIDE_REGEX
        .find(rhyme)
        .map_err(|e| anyhow!("glide match on {rhyme:?}: {e}"))?;
    Ok(match glide {
        Some(m) => rhyme[m.end()..].to_string(),
        None => rhyme.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandarin_final() {
        assert_eq!(get_rhyme_final("zhong1", Scheme::Mandarin), "ong");
        assert_eq!(get_rhyme_final("shan1", Scheme::Mandarin), "an");
        assert_eq!(get_rhyme_final("he2", Scheme::Mandarin), "e");
        assert_eq!(get_rhyme_final("an4", Scheme::Mandarin), "an");
        assert_eq!(get_rhyme_final("yuan2", Scheme::Mandarin), "uan");
    }

    #[test]
    fn test_mandarin_prefers_two_letter_initial() {
        assert_eq!(get_rhyme_final("chun1", Scheme::Mandarin), "un");
        assert_eq!(get_rhyme_final("zai4", Scheme::Mandarin), "ai");
        assert_eq!(get_rhyme_final("  ZHI1 ", Scheme::Mandarin), "i");
    }

    #[test]
    fn test_cantonese_final() {
        assert_eq!(get_rhyme_final("gwok3", Scheme::Cantonese), "ok");
        assert_eq!(get_rhyme_final("ngo5", Scheme::Cantonese), "o");
        assert_eq!(get_rhyme_final("kwan4", Scheme::Cantonese), "an");
        assert_eq!(get_rhyme_final("jyut6", Scheme::Cantonese), "yut");
        assert_eq!(get_rhyme_final("aa3", Scheme::Cantonese), "aa");
    }

    #[test]
    fn test_cantonese_keeps_out_of_range_digits() {
        assert_eq!(get_rhyme_final("si7", Scheme::Cantonese), "i7");
    }

    #[test]
    fn test_middle_chinese_final() {
        assert_eq!(get_rhyme_final("kjang", Scheme::MiddleChinese), "ang");
        assert_eq!(get_rhyme_final("ian", Scheme::MiddleChinese), "an");
        assert_eq!(get_rhyme_final("in", Scheme::MiddleChinese), "in");
        assert_eq!(get_rhyme_final("uan", Scheme::MiddleChinese), "an");
        assert_eq!(get_rhyme_final("un", Scheme::MiddleChinese), "un");
    }

    #[test]
    fn test_middle_chinese_tone_letters() {
        assert_eq!(get_rhyme_final("tanq", Scheme::MiddleChinese), "an");
        assert_eq!(get_rhyme_final("kuoh", Scheme::MiddleChinese), "o");
        // only one trailing tone letter is stripped
        assert_eq!(get_rhyme_final("tahh", Scheme::MiddleChinese), "ah");
    }

    #[test]
    fn test_middle_chinese_glide_backtracks_to_nucleus() {
        assert_eq!(get_rhyme_final("kiun", Scheme::MiddleChinese), "un");
        assert_eq!(get_rhyme_final("yi", Scheme::MiddleChinese), "i");
    }

    #[test]
    fn test_middle_chinese_without_vowel() {
        assert_eq!(get_rhyme_final("ng", Scheme::MiddleChinese), "ng");
        assert_eq!(get_rhyme_final("mh", Scheme::MiddleChinese), "m");
    }

    #[test]
    fn test_empty_input() {
        for scheme in Scheme::ALL {
            assert_eq!(get_rhyme_final("", scheme), "");
            assert_eq!(get_rhyme_final("   ", scheme), "");
        }
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            ("zhong1", Scheme::Mandarin),
            ("guang1", Scheme::Mandarin),
            ("gwok3", Scheme::Cantonese),
            ("sam1", Scheme::Cantonese),
            ("kjang", Scheme::MiddleChinese),
            ("ian", Scheme::MiddleChinese),
            ("tanq", Scheme::MiddleChinese),
        ];
        for (syllable, scheme) in samples {
            let once = get_rhyme_final(syllable, scheme);
            assert_eq!(get_rhyme_final(&once, scheme), once, "{syllable}");
        }
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("cmn".parse::<Scheme>(), Ok(Scheme::Mandarin));
        assert_eq!("YUE".parse::<Scheme>(), Ok(Scheme::Cantonese));
        assert_eq!("lzt".parse::<Scheme>(), Ok(Scheme::MiddleChinese));
        assert!("eng".parse::<Scheme>().is_err());
    }
}
