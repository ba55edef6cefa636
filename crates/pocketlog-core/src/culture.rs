//! Culture conventions for format specs
//!
//! A [`Culture`] only carries what single-value formatting needs: separators
//! and the AM/PM designators. The culture used by rendering is scoped to the
//! current thread and defaults to [`Culture::invariant`].

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Number and date conventions used by culture-aware formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culture {
    pub name: String,
    pub decimal_separator: char,
    pub group_separator: char,
    pub am_designator: String,
    pub pm_designator: String,
}

thread_local! {
    static CURRENT: RefCell<Culture> = RefCell::new(Culture::invariant());
}

impl Culture {
    /// Culture-neutral conventions
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            decimal_separator: '.',
            group_separator: ',',
            am_designator: "AM".to_string(),
            pm_designator: "PM".to_string(),
        }
    }

    /// Look up a culture by its name.
    ///
    /// Returns `None` for names without built-in conventions.
    pub fn by_name(name: &str) -> Option<Self> {
        let (decimal, group, am, pm) = match name {
            "" | "invariant" => return Some(Self::invariant()),
            "en-US" | "en-GB" => ('.', ',', "AM", "PM"),
            "de-DE" => (',', '.', "", ""),
            "fr-FR" => (',', '\u{202f}', "", ""),
            _ => return None,
        };
        Some(Self {
            name: name.to_string(),
            decimal_separator: decimal,
            group_separator: group,
            am_designator: am.to_string(),
            pm_designator: pm.to_string(),
        })
    }

    /// The culture in effect on the calling thread
    pub fn current() -> Self {
        CURRENT.with(|c| c.borrow().clone())
    }

    /// Replace the culture of the calling thread
    pub fn set_current(culture: Culture) {
        CURRENT.with(|c| *c.borrow_mut() = culture);
    }

    /// Run `f` with `self` as the current culture, restoring the previous one after
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let previous = CURRENT.with(|c| c.replace(self.clone()));
        let _restore = Restore(Some(previous));
        f()
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

struct Restore(Option<Culture>);

impl Drop for Restore {
    fn drop(&mut self) {
        if let Some(previous) = self.0.take() {
            CURRENT.with(|c| *c.borrow_mut() = previous);
        }
    }
}
