use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// 九個排名層級，依顯示順序排列。 / The nine ranked tiers in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Goty,
    Aaa,
    Aa,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Tier {
    pub const ALL: [Tier; 9] = [
        Tier::Goty,
        Tier::Aaa,
        Tier::Aa,
        Tier::A,
        Tier::B,
        Tier::C,
        Tier::D,
        Tier::E,
        Tier::F,
    ];

    /// 儲存格式中使用的識別字。 / Identifier used by the storage format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Goty => "GOTY",
            Tier::Aaa => "AAA",
            Tier::Aa => "AA",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
            Tier::E => "E",
            Tier::F => "F",
        }
    }

    /// 該層級提供的兩個細分選項。 / The two refinements offered while an item sits in this tier.
    pub fn options(&self) -> [SubOption; 2] {
        [
            SubOption::new(*self, Refinement::Plus),
            SubOption::new(*self, Refinement::Minus),
        ]
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 無法辨識的層級或容器識別字。 / Raised for identifiers that name no bucket.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tier identifier {0:?}")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

/// 項目所在的容器：未排名區或某個層級。 / The bucket an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketId {
    Unranked,
    Ranked(Tier),
}

impl BucketId {
    pub const UNRANKED_STR: &'static str = "unranked";

    /// 所有容器，未排名區排第一。 / Every bucket, unranked first, then tiers in display order.
    pub fn all() -> impl Iterator<Item = BucketId> {
        std::iter::once(BucketId::Unranked).chain(Tier::ALL.into_iter().map(BucketId::Ranked))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketId::Unranked => Self::UNRANKED_STR,
            BucketId::Ranked(tier) => tier.as_str(),
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            BucketId::Unranked => None,
            BucketId::Ranked(tier) => Some(*tier),
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, BucketId::Ranked(_))
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            BucketId::Unranked => 0,
            BucketId::Ranked(tier) => *tier as usize + 1,
        }
    }
}

impl From<Tier> for BucketId {
    fn from(tier: Tier) -> Self {
        BucketId::Ranked(tier)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketId {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::UNRANKED_STR {
            Ok(BucketId::Unranked)
        } else {
            s.parse().map(BucketId::Ranked)
        }
    }
}

/// 層級內的細分：原層級、`+` 或 `-`。 / Refinement applied on top of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Refinement {
    Bare,
    Plus,
    Minus,
}

impl Refinement {
    pub fn suffix(&self) -> &'static str {
        match self {
            Refinement::Bare => "",
            Refinement::Plus => "+",
            Refinement::Minus => "-",
        }
    }
}

/// 細分標籤，例如 `A+`。 / A derived sub-tier label such as `A+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubOption {
    pub tier: Tier,
    pub refinement: Refinement,
}

impl SubOption {
    pub fn new(tier: Tier, refinement: Refinement) -> Self {
        Self { tier, refinement }
    }

    /// Parses a label that must belong to `tier`; `A`, `A+` and `A-` are the only
    /// labels accepted for tier `A`.
    pub fn parse_for(tier: Tier, label: &str) -> Option<Self> {
        let rest = label.strip_prefix(tier.as_str())?;
        let refinement = match rest {
            "" => Refinement::Bare,
            "+" => Refinement::Plus,
            "-" => Refinement::Minus,
            _ => return None,
        };
        Some(Self::new(tier, refinement))
    }
}

impl fmt::Display for SubOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tier.as_str(), self.refinement.suffix())
    }
}
