//! Signal extraction from free-text issue titles, bodies and comments.
//!
//! Two independent pattern families are applied:
//!
//! - **Trigger words**: topical keywords (English and Chinese) matched
//!   case-insensitively after all whitespace has been removed, so that a
//!   term split across lines or spaces still matches.
//! - **Label tags**: explicit `//<prefix><rest>` tokens at the start of a
//!   line, naming one or more comma-separated labels.
//!
//! Both vocabularies are data held by a [`Vocabulary`], so callers (and
//! tests) can supply reduced word lists.

use regex::Regex;

use crate::types::LabelSet;

/// Trigger words recognised by default, in match-precedence order.
///
/// Longer terms come before their prefixes (`mailinglist` before `mail`)
/// because alternation is leftmost-first.
pub const DEFAULT_TRIGGER_WORDS: &[&str] = &[
    "mailinglist",
    "maillist",
    "mail",
    "邮件",
    "邮箱",
    "subscribe",
    "订阅",
    "etherpad",
    "meetingrecord",
    "会议记录",
    "cla",
    "signagreement",
    "签署贡献者协议",
    "guarding",
    "jenkins",
    "staticcheck",
    "test",
    "compile",
    "robot",
    "测试",
    "编译",
    "检查",
    "website",
    "blog",
    "mirror",
    "下载",
    "官网",
    "博客",
    "镜像",
    "meeting",
    "会议",
    "例会",
    "sensitivewords",
    "敏感词",
    "log",
    "日志",
    "docs",
    "documents",
    "文档",
    "labelsetting",
    "标签设置",
    "access",
    "permission",
    "权限",
    "requirement",
    "featurerequest",
    "需求",
    "translation",
    "翻译",
    "bug",
    "cve",
    "gitee",
    "git",
    "scheduling",
    "调度",
    "obs",
    "rpm",
    "prm",
    "iso",
    "src-openeuler",
    "openeuler",
    "开源实习",
];

/// Label prefixes accepted after `//` in a label tag.
pub const DEFAULT_TAG_PREFIXES: &[&str] = &[
    "mailing", "etherpad", "CLA", "guarding", "website", "meeting", "kind", "bug", "CVE",
    "security", "activity", "gitee", "git", "sig", "release", "build", "repo",
];

/// Compiled trigger-word and label-tag patterns.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// `None` when no trigger words are configured.
    words: Option<Regex>,
    /// `None` when no tag prefixes are configured.
    tags: Option<Regex>,
}

impl Vocabulary {
    /// Builds a vocabulary from trigger words and tag prefixes.
    ///
    /// Both lists are matched literally. Trigger words match
    /// case-insensitively; tag prefixes are case-sensitive because label
    /// names are.
    pub fn new(trigger_words: &[&str], tag_prefixes: &[&str]) -> Result<Self, regex::Error> {
        let words = if trigger_words.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("(?i)(?:{})", alternation(trigger_words)))?)
        };

        let tags = if tag_prefixes.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?m)^[ \t]*//((?:{})\S*)",
                alternation(tag_prefixes)
            ))?)
        };

        Ok(Vocabulary { words, tags })
    }

    /// Extracts the set of trigger words found in `text`.
    ///
    /// Whitespace is deleted before matching, and every match is trimmed and
    /// lower-cased. No match yields an empty set.
    ///
    /// ```
    /// use triage_bot::signals::Vocabulary;
    ///
    /// let vocab = Vocabulary::default();
    /// let words = vocab.extract_words("The mail\nbox is full, see the DOCS");
    /// assert!(words.contains("mail"));
    /// assert!(words.contains("docs"));
    /// ```
    pub fn extract_words(&self, text: &str) -> LabelSet {
        let Some(words) = &self.words else {
            return LabelSet::new();
        };
        let compacted: String = text.chars().filter(|c| !c.is_whitespace()).collect();

        words
            .find_iter(&compacted)
            .map(|m| m.as_str().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// Extracts the labels named by `//<prefix>...` tags in `text`.
    ///
    /// The leading `//` is stripped and the remainder split on commas, so a
    /// single tag may declare several labels.
    ///
    /// ```
    /// use triage_bot::signals::Vocabulary;
    ///
    /// let vocab = Vocabulary::default();
    /// let labels = vocab.extract_label_tags("//kind/bug,kind/feature");
    /// assert_eq!(labels.len(), 2);
    /// assert!(labels.contains("kind/bug"));
    /// assert!(labels.contains("kind/feature"));
    /// ```
    pub fn extract_label_tags(&self, text: &str) -> LabelSet {
        let mut labels = LabelSet::new();
        let Some(tags) = &self.tags else {
            return labels;
        };

        for caps in tags.captures_iter(text) {
            let Some(tag) = caps.get(1) else {
                continue;
            };

            for label in tag.as_str().trim().split(',') {
                let label = label.trim();
                if !label.is_empty() {
                    labels.insert(label.to_string());
                }
            }
        }

        labels
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        // The default lists are fixed literals, escaped before compilation.
        Vocabulary::new(DEFAULT_TRIGGER_WORDS, DEFAULT_TAG_PREFIXES)
            .expect("default vocabulary compiles")
    }
}

fn alternation(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(items: &[&str]) -> LabelSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ==================== Trigger words ====================

    #[test]
    fn empty_text_has_no_words() {
        assert!(Vocabulary::default().extract_words("").is_empty());
    }

    #[test]
    fn text_without_triggers_has_no_words() {
        assert!(Vocabulary::default().extract_words("zzz qqq").is_empty());
    }

    #[test]
    fn words_are_lowercased_and_deduplicated() {
        let words = Vocabulary::default().extract_words("BUG bug Bug CVE");
        assert_eq!(words, set(&["bug", "cve"]));
    }

    #[test]
    fn whitespace_split_term_still_matches() {
        let words = Vocabulary::default().extract_words("please fix the mailing\n list");
        assert_eq!(words, set(&["mailinglist"]));
    }

    #[test]
    fn longer_term_wins_over_prefix() {
        let words = Vocabulary::default().extract_words("maillist");
        assert_eq!(words, set(&["maillist"]));
    }

    #[test]
    fn mail_box_collapses_to_mail() {
        let words = Vocabulary::default().extract_words("mail box");
        assert_eq!(words, set(&["mail"]));
    }

    #[test]
    fn chinese_terms_match() {
        let words = Vocabulary::default().extract_words("文档 有 问题，开源 实习");
        assert_eq!(words, set(&["文档", "开源实习"]));
    }

    #[test]
    fn packaging_terms_match() {
        let words = Vocabulary::default().extract_words("OBS build of the PRM and iso");
        assert_eq!(words, set(&["obs", "prm", "iso"]));
    }

    #[test]
    fn reduced_vocabulary_only_matches_its_words() {
        let vocab = Vocabulary::new(&["widget"], &["kind"]).unwrap();
        assert_eq!(vocab.extract_words("widget mail docs"), set(&["widget"]));
    }

    #[test]
    fn empty_vocabulary_matches_nothing() {
        let vocab = Vocabulary::new(&[], &[]).unwrap();
        assert!(vocab.extract_words("mail docs bug").is_empty());
        assert!(vocab.extract_label_tags("//kind/bug").is_empty());
    }

    #[test]
    fn trigger_words_are_literal() {
        let vocab = Vocabulary::new(&["c++"], &["kind"]).unwrap();
        assert_eq!(vocab.extract_words("c++ and cc"), set(&["c++"]));
    }

    proptest! {
        /// Inserting whitespace anywhere never changes the extracted set.
        #[test]
        fn words_ignore_whitespace(
            text in "[a-zA-Z邮件文档 ]{0,40}",
            inserts in proptest::collection::vec((0usize..60, "[ \n\t]{1,3}"), 0..6)
        ) {
            let vocab = Vocabulary::default();
            let mut chars: Vec<char> = text.chars().collect();
            for (pos, ws) in inserts {
                let at = pos.min(chars.len());
                for (i, c) in ws.chars().enumerate() {
                    chars.insert(at + i, c);
                }
            }
            let spaced: String = chars.into_iter().collect();

            prop_assert_eq!(vocab.extract_words(&text), vocab.extract_words(&spaced));
        }

        /// Arbitrary text should never cause a panic.
        #[test]
        fn arbitrary_text_never_panics(text: String) {
            let vocab = Vocabulary::default();
            let _ = vocab.extract_words(&text);
            let _ = vocab.extract_label_tags(&text);
        }
    }

    // ==================== Label tags ====================

    #[test]
    fn comma_joined_tag_splits() {
        let labels = Vocabulary::default().extract_label_tags("//kind/bug,kind/feature");
        assert_eq!(labels, set(&["kind/bug", "kind/feature"]));
    }

    #[test]
    fn tags_on_several_lines() {
        let text = "Found a crash.\n//kind/bug\n  //sig/kernel\nthanks";
        let labels = Vocabulary::default().extract_label_tags(text);
        assert_eq!(labels, set(&["kind/bug", "sig/kernel"]));
    }

    #[test]
    fn tag_must_start_a_line() {
        let labels = Vocabulary::default().extract_label_tags("see http://kind/bug");
        assert!(labels.is_empty());
    }

    #[test]
    fn extra_slash_is_not_a_tag() {
        let labels = Vocabulary::default().extract_label_tags("///kind/bug");
        assert!(labels.is_empty());
    }

    #[test]
    fn unknown_prefix_is_ignored() {
        let labels = Vocabulary::default().extract_label_tags("//priority/high");
        assert!(labels.is_empty());
    }

    #[test]
    fn tag_stops_at_whitespace() {
        let labels = Vocabulary::default().extract_label_tags("//kind/decision please review");
        assert_eq!(labels, set(&["kind/decision"]));
    }

    #[test]
    fn empty_comma_segments_are_dropped() {
        let labels = Vocabulary::default().extract_label_tags("//kind/bug,,sig/doc,");
        assert_eq!(labels, set(&["kind/bug", "sig/doc"]));
    }

    #[test]
    fn tag_prefixes_are_case_sensitive() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.extract_label_tags("//CVE/pending"), set(&["CVE/pending"]));
        assert!(vocab.extract_label_tags("//KIND/bug").is_empty());
    }

    #[test]
    fn duplicate_tags_collapse() {
        let labels = Vocabulary::default().extract_label_tags("//kind/bug\n//kind/bug,kind/bug");
        assert_eq!(labels, set(&["kind/bug"]));
    }
}
