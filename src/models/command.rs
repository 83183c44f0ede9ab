//! Classified intents

use std::fmt;

/// Expense category selected by the trailing code of an expense message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Transportation,
    Food,
    Miscellaneous,
}

impl Category {
    /// Map a single-character category code to its category.
    ///
    /// `l` has no category of its own and lands in miscellaneous.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            't' => Some(Category::Transportation),
            'f' => Some(Category::Food),
            'm' | 'l' => Some(Category::Miscellaneous),
            _ => None,
        }
    }

    /// Name written to the ledger's `Category` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transportation => "transportation",
            Category::Food => "food",
            Category::Miscellaneous => "miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an inbound text message asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// PromptPay QR request, with an optional positive amount
    PaymentRequest { amount: Option<f64> },
    /// Expense to append to the ledger
    ExpenseEntry { category: Category, amount: f64 },
    /// Anything else
    Unrecognized { text: String },
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::PaymentRequest { .. } => "payment_request",
            Command::ExpenseEntry { .. } => "expense_entry",
            Command::Unrecognized { .. } => "unrecognized",
        }
    }
}
