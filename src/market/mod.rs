//! Market formatting and session utilities.
//!
//! Pure, stateless helpers shared by every view: number and currency
//! formatting in the conventions the dashboard uses, semantic tone mapping
//! for changes and signals, and the OMX Stockholm session resolver.

mod format;
mod session;
mod tone;

pub use format::{
    format_change, format_countdown, format_kr, format_market_cap, format_price,
    format_signed_percent, format_timestamp, format_volume, group_digits, short_symbol,
    stockholm_clock, to_cents,
};
pub use session::{
    CLOSE_MINUTE, EXCHANGE_TZ, MarketStatus, OPEN_MINUTE, Session, market_status,
    market_status_at,
};
pub use tone::{
    Tone, change_tone, impact_tone, inverted_change_tone, leading_action, sentiment_tone,
    signal_tone,
};
