use serde::{Deserialize, Serialize};
use std::fmt;

/// Card scheme, identified by its upper-case raw identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardNetwork {
    #[serde(rename = "AMEX")]
    Amex,
    #[serde(rename = "DINERS_CLUB")]
    Diners,
    #[serde(rename = "DISCOVER")]
    Discover,
    #[serde(rename = "JCB")]
    Jcb,
    #[serde(rename = "MAESTRO")]
    Maestro,
    #[serde(rename = "MASTERCARD")]
    MasterCard,
    #[serde(rename = "MIR")]
    Mir,
    #[serde(rename = "UNIONPAY")]
    UnionPay,
    #[serde(rename = "VISA")]
    Visa,
    #[serde(rename = "OTHER")]
    Unknown,
}

/// Inclusive BIN prefix range; both bounds have the same digit count
struct PrefixRange(u32, u32);

const AMEX_PREFIXES: &[PrefixRange] = &[PrefixRange(34, 34), PrefixRange(37, 37)];
const DINERS_PREFIXES: &[PrefixRange] = &[
    PrefixRange(300, 305),
    PrefixRange(36, 36),
    PrefixRange(38, 39),
];
const DISCOVER_PREFIXES: &[PrefixRange] = &[
    PrefixRange(6011, 6011),
    PrefixRange(644, 649),
    PrefixRange(65, 65),
];
const JCB_PREFIXES: &[PrefixRange] = &[
    PrefixRange(2131, 2131),
    PrefixRange(1800, 1800),
    PrefixRange(3528, 3589),
];
const MAESTRO_PREFIXES: &[PrefixRange] = &[
    PrefixRange(493698, 493698),
    PrefixRange(500000, 504174),
    PrefixRange(504176, 506698),
    PrefixRange(506779, 508999),
    PrefixRange(56, 59),
    PrefixRange(63, 63),
    PrefixRange(67, 67),
];
const MASTERCARD_PREFIXES: &[PrefixRange] = &[
    PrefixRange(51, 55),
    PrefixRange(2221, 2229),
    PrefixRange(223, 229),
    PrefixRange(23, 26),
    PrefixRange(270, 271),
    PrefixRange(2720, 2720),
];
const MIR_PREFIXES: &[PrefixRange] = &[PrefixRange(2200, 2204)];
const UNIONPAY_PREFIXES: &[PrefixRange] = &[PrefixRange(62, 62), PrefixRange(81, 81)];
const VISA_PREFIXES: &[PrefixRange] = &[PrefixRange(4, 4)];

impl CardNetwork {
    pub const KNOWN: [CardNetwork; 9] = [
        CardNetwork::Amex,
        CardNetwork::Diners,
        CardNetwork::Discover,
        CardNetwork::Jcb,
        CardNetwork::Maestro,
        CardNetwork::MasterCard,
        CardNetwork::Mir,
        CardNetwork::UnionPay,
        CardNetwork::Visa,
    ];

    pub fn raw_value(&self) -> &'static str {
        match self {
            CardNetwork::Amex => "AMEX",
            CardNetwork::Diners => "DINERS_CLUB",
            CardNetwork::Discover => "DISCOVER",
            CardNetwork::Jcb => "JCB",
            CardNetwork::Maestro => "MAESTRO",
            CardNetwork::MasterCard => "MASTERCARD",
            CardNetwork::Mir => "MIR",
            CardNetwork::UnionPay => "UNIONPAY",
            CardNetwork::Visa => "VISA",
            CardNetwork::Unknown => "OTHER",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CardNetwork::Amex => "American Express",
            CardNetwork::Diners => "Diners",
            CardNetwork::Discover => "Discover",
            CardNetwork::Jcb => "JCB",
            CardNetwork::Maestro => "Maestro",
            CardNetwork::MasterCard => "Mastercard",
            CardNetwork::Mir => "Mir",
            CardNetwork::UnionPay => "UnionPay",
            CardNetwork::Visa => "Visa",
            CardNetwork::Unknown => "Unknown",
        }
    }

    /// Number of digits in the card security code
    pub fn cvv_length(&self) -> usize {
        match self {
            CardNetwork::Amex => 4,
            _ => 3,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace(|c: char| c == '-' || c == ' ', "_");
        match normalized.as_str() {
            "AMEX" | "AMERICAN_EXPRESS" => Some(CardNetwork::Amex),
            "DINERS" | "DINERS_CLUB" => Some(CardNetwork::Diners),
            "DISCOVER" => Some(CardNetwork::Discover),
            "JCB" => Some(CardNetwork::Jcb),
            "MAESTRO" => Some(CardNetwork::Maestro),
            "MASTERCARD" | "MASTER_CARD" => Some(CardNetwork::MasterCard),
            "MIR" => Some(CardNetwork::Mir),
            "UNIONPAY" | "UNION_PAY" => Some(CardNetwork::UnionPay),
            "VISA" => Some(CardNetwork::Visa),
            "OTHER" | "UNKNOWN" => Some(CardNetwork::Unknown),
            _ => None,
        }
    }

    fn prefixes(&self) -> &'static [PrefixRange] {
        match self {
            CardNetwork::Amex => AMEX_PREFIXES,
            CardNetwork::Diners => DINERS_PREFIXES,
            CardNetwork::Discover => DISCOVER_PREFIXES,
            CardNetwork::Jcb => JCB_PREFIXES,
            CardNetwork::Maestro => MAESTRO_PREFIXES,
            CardNetwork::MasterCard => MASTERCARD_PREFIXES,
            CardNetwork::Mir => MIR_PREFIXES,
            CardNetwork::UnionPay => UNIONPAY_PREFIXES,
            CardNetwork::Visa => VISA_PREFIXES,
            CardNetwork::Unknown => &[],
        }
    }

    /// Detect the network from a (possibly partial) card number.
    ///
    /// Spaces are ignored. The longest matching prefix wins, so `6011…`
    /// resolves to Discover rather than a shorter overlapping range.
    pub fn detect(card_number: &str) -> CardNetwork {
        let digits: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return CardNetwork::Unknown;
        }

        let mut best: Option<(usize, CardNetwork)> = None;
        for network in CardNetwork::KNOWN {
            for range in network.prefixes() {
                let width = range.0.to_string().len();
                if digits.len() < width {
                    continue;
                }
                let matches = digits[..width]
                    .parse::<u32>()
                    .map_or(false, |prefix| prefix >= range.0 && prefix <= range.1);
                if matches && best.map_or(true, |(w, _)| width > w) {
                    best = Some((width, network));
                }
            }
        }

        best.map(|(_, network)| network).unwrap_or(CardNetwork::Unknown)
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw_value())
    }
}
