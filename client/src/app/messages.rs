//! User-facing strings
//!
//! Every text the components hand to a notifier or expose for rendering
//! comes from here, in the configured locale.

use serde::{Deserialize, Serialize};

use crate::domain::entities::VoteSummary;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Ru => write!(f, "ru"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            _ => Err(DomainError::Validation(format!(
                "Unknown locale: {}. Use: ru, en",
                s
            ))),
        }
    }
}

/// Noun forms for "one", "few" and "many"
type Forms = [&'static str; 3];

const RU_PLUS: Forms = ["плюс", "плюса", "плюсов"];
const RU_MINUS: Forms = ["минус", "минуса", "минусов"];
const RU_USERS: Forms = ["юзера", "юзеров", "юзеров"];
const EN_PLUS: Forms = ["plus", "pluses", "pluses"];
const EN_MINUS: Forms = ["minus", "minuses", "minuses"];
const EN_USERS: Forms = ["user", "users", "users"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn feed_load_failed(&self) -> &'static str {
        match self.locale {
            Locale::Ru => "Не удалось загрузить ленту постов",
            Locale::En => "Failed to load the post feed",
        }
    }

    pub fn vote_not_counted(&self) -> &'static str {
        match self.locale {
            Locale::Ru => "Голос не учтён 🤬",
            Locale::En => "Vote not counted 🤬",
        }
    }

    pub fn vote_list_load_failed(&self) -> &'static str {
        match self.locale {
            Locale::Ru => "Не удалось загрузить голоса!",
            Locale::En => "Failed to load votes!",
        }
    }

    /// Tooltip for vote buttons when voting is disabled
    pub fn voting_disabled(&self) -> &'static str {
        match self.locale {
            Locale::Ru => {
                "Голосование за карму невозможно. Загляните во вкладку \"Саморегуляция\" в профиле."
            }
            Locale::En => {
                "Karma voting is unavailable. Check the \"Self-moderation\" tab in your profile."
            }
        }
    }

    pub fn empty_vote_list(&self) -> &'static str {
        match self.locale {
            Locale::Ru => "Пусто. Совсем ничего.",
            Locale::En => "Empty. Nothing at all.",
        }
    }

    /// "3 плюса от 2 юзеров", or "нет плюсов" when nobody voted up
    pub fn positive_summary(&self, summary: &VoteSummary) -> String {
        match self.locale {
            Locale::Ru => self.summary_line(summary, RU_PLUS, RU_USERS, "от", "нет плюсов"),
            Locale::En => self.summary_line(summary, EN_PLUS, EN_USERS, "from", "no pluses"),
        }
    }

    pub fn negative_summary(&self, summary: &VoteSummary) -> String {
        match self.locale {
            Locale::Ru => self.summary_line(summary, RU_MINUS, RU_USERS, "от", "нет минусов"),
            Locale::En => self.summary_line(summary, EN_MINUS, EN_USERS, "from", "no minuses"),
        }
    }

    fn summary_line(
        &self,
        summary: &VoteSummary,
        value_forms: Forms,
        user_forms: Forms,
        from: &str,
        nothing: &str,
    ) -> String {
        if summary.voter_count == 0 {
            return nothing.to_string();
        }
        format!(
            "{} {} {}",
            self.pluralize(summary.value_sum, value_forms),
            from,
            self.pluralize(i64::from(summary.voter_count), user_forms)
        )
    }

    /// Number followed by the matching noun form. Negative numbers are shown
    /// by magnitude.
    pub fn pluralize(&self, n: i64, forms: Forms) -> String {
        let n = n.unsigned_abs();
        let form = match self.locale {
            Locale::Ru => ru_plural_form(n),
            Locale::En => {
                if n == 1 {
                    0
                } else {
                    2
                }
            }
        };
        format!("{} {}", n, forms[form])
    }
}

fn ru_plural_form(n: u64) -> usize {
    let (last, last_two) = (n % 10, n % 100);
    if last == 1 && last_two != 11 {
        0
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        1
    } else {
        2
    }
}
