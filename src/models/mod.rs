pub mod card;
pub mod currency;
pub mod profile;
pub mod scored;

pub use card::{Card, CardTier, RewardRate, DEFAULT_PROFIT_MARGIN, DEFAULT_REWARD_CATEGORY};
pub use currency::CurrencyTable;
pub use profile::{MonthlySpending, SpendCategory, UserProfile, NEW_TO_CREDIT_SCORE};
pub use scored::{Analysis, NetValue, ScoredCard, Scores, ValueBreakdown};
