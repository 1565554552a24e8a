// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conditional deposit addresses and their magnet links.
//!
//! A magnet link has the form
//!
//! ```text
//! iota://<81-tryte address><9-tryte checksum>/?t=<timeout_at>&m=<0|1>&am=<expected_amount>
//! ```
//!
//! The checksum is computed over the address and every parameter, so that
//! editing any of them after the link was issued invalidates it. Only this
//! parameter naming is supported; links using other parameter names carry no
//! `t` and are rejected.

use std::borrow::Cow;
use std::fmt;

use sigma_trinary::ternary::{
    int_to_trits, is_trytes, pad_trits, trits_to_trytes, trytes_to_trits,
};
use sigma_trinary::{CurlP81, Sponge, Trit, HASH_LENGTH};
use tracing::{debug, trace};
use url::Url;

use crate::address::{Address, AddressVerifier, KerlVerifier};
use crate::clock::{Clock, SystemClock};
use crate::LinkError;

/// The scheme every magnet link starts with
pub const LINK_SCHEME: &str = "iota://";

/// Amount of trytes of the checksum appended to the address of a link
pub const LINK_CHECKSUM_TRYTES: usize = 9;

const ADDRESS_TRYTES: usize = 81;
const HASH_TRYTES: usize = HASH_LENGTH / 3;

const TIMEOUT_TRITS: usize = 27;
const AMOUNT_TRITS: usize = 81;
const MULTI_USE_TRITS: usize = 1;
// the address prefix fills the block left by the parameters
const ADDRESS_PREFIX_TRITS: usize =
    HASH_LENGTH - TIMEOUT_TRITS - MULTI_USE_TRITS - AMOUNT_TRITS;

const TIMEOUT_KEY: &str = "t";
const MULTI_USE_KEY: &str = "m";
const EXPECTED_AMOUNT_KEY: &str = "am";

/// An address together with the conditions under which the funds it receives
/// become usable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionalDepositAddress {
    /// The deposit address
    pub address: Address,
    /// Unix time, in seconds, after which the funds are usable regardless of
    /// the expected amount
    pub timeout_at: i64,
    /// Whether the address may be funded by more than one transfer
    pub multi_use: bool,
    /// Amount after whose arrival the funds are usable, zero if the funds
    /// are only usable after the timeout
    pub expected_amount: u64,
}

impl ConditionalDepositAddress {
    /// Creates a new conditional deposit address
    pub fn new(
        address: Address,
        timeout_at: i64,
        multi_use: bool,
        expected_amount: u64,
    ) -> Self {
        Self {
            address,
            timeout_at,
            multi_use,
            expected_amount,
        }
    }

    /// Computes the 9-tryte checksum protecting the link of this address.
    ///
    /// # Errors
    /// [`LinkError::InvalidTimeout`] if the timeout does not fit 27 trits.
    pub fn checksum(&self) -> Result<String, LinkError> {
        let address = trytes_to_trits(self.address.as_str())
            .map_err(|_| LinkError::MalformedLink)?;
        let timeout = pad_trits(&int_to_trits(self.timeout_at), TIMEOUT_TRITS)
            .map_err(|_| LinkError::InvalidTimeout)?;
        let amount =
            pad_trits(&int_to_trits(self.expected_amount), AMOUNT_TRITS)
                .map_err(|_| LinkError::InvalidAmount)?;

        let mut block: Vec<Trit> = Vec::with_capacity(HASH_LENGTH);
        block.extend_from_slice(&address[..ADDRESS_PREFIX_TRITS]);
        block.extend(timeout);
        block.push(Trit::from(self.multi_use));
        block.extend(amount);

        let digest = CurlP81::new()
            .digest(&block)
            .and_then(|digest| trits_to_trytes(&digest))
            .map_err(|_| LinkError::MalformedLink)?;

        Ok(digest[HASH_TRYTES - LINK_CHECKSUM_TRYTES..].to_string())
    }

    /// Returns the magnet link of this address, without checking whether it
    /// is expired.
    ///
    /// # Errors
    /// [`LinkError::InvalidTimeout`] if the timeout does not fit 27 trits.
    pub fn magnet_link(&self) -> Result<String, LinkError> {
        let checksum = self.checksum()?;
        Ok(format!(
            "{LINK_SCHEME}{}{checksum}/?{TIMEOUT_KEY}={}&{MULTI_USE_KEY}={}&{EXPECTED_AMOUNT_KEY}={}",
            self.address,
            self.timeout_at,
            u8::from(self.multi_use),
            self.expected_amount,
        ))
    }
}

impl fmt::Display for ConditionalDepositAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (timeout at {}, {}, expected amount {})",
            self.address.preview(),
            self.timeout_at,
            if self.multi_use {
                "multi use"
            } else {
                "single use"
            },
            self.expected_amount,
        )
    }
}

/// Encodes and validates magnet links.
///
/// The codec reads the current time from its [`Clock`] on every call, so the
/// same link may be valid at one call and expired at the next.
#[derive(Debug, Clone, Default)]
pub struct MagnetLinkCodec<C = SystemClock, V = KerlVerifier> {
    clock: C,
    verifier: V,
}

impl MagnetLinkCodec {
    /// A codec using the system clock and the Kerl address verifier
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock, V: AddressVerifier> MagnetLinkCodec<C, V> {
    /// A codec using the given clock and address verifier
    pub fn with(clock: C, verifier: V) -> Self {
        Self { clock, verifier }
    }

    /// The clock used to check the expiration of links
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Encodes the address into its magnet link.
    ///
    /// # Errors
    /// - [`LinkError::InvalidAddressChecksum`] if the address fails the
    ///   address check.
    /// - [`LinkError::LinkExpired`] if the timeout is not in the future.
    /// - [`LinkError::InvalidTimeout`] if the timeout does not fit 27 trits.
    pub fn encode(
        &self,
        cda: &ConditionalDepositAddress,
    ) -> Result<String, LinkError> {
        if !self.verifier.verify(&cda.address) {
            return Err(LinkError::InvalidAddressChecksum);
        }
        if cda.timeout_at <= self.clock.now() {
            return Err(LinkError::LinkExpired);
        }
        cda.magnet_link()
    }

    /// Decodes a magnet link, returning the address only if every check
    /// passes.
    ///
    /// # Errors
    /// The first check the link fails, in this order:
    /// [`LinkError::MalformedLink`], [`LinkError::InvalidAddressChecksum`],
    /// [`LinkError::InvalidTimeout`], [`LinkError::LinkExpired`],
    /// [`LinkError::InvalidAmount`], [`LinkError::ChecksumMismatch`].
    pub fn decode(
        &self,
        link: &str,
    ) -> Result<ConditionalDepositAddress, LinkError> {
        self.try_decode(link)
            .inspect(|cda| trace!(address = %cda.address, "Accepted magnet link"))
            .inspect_err(|err| debug!(%err, "Rejected magnet link"))
    }

    /// Returns `true` if [`decode`](Self::decode) accepts the link
    pub fn validate(&self, link: &str) -> bool {
        self.decode(link).is_ok()
    }

    fn try_decode(
        &self,
        link: &str,
    ) -> Result<ConditionalDepositAddress, LinkError> {
        if !link.starts_with(LINK_SCHEME) {
            return Err(LinkError::MalformedLink);
        }

        let url = Url::parse(link).map_err(|_| LinkError::MalformedLink)?;
        let (address, checksum) = split_segment(&url)?;

        if !self.verifier.verify(&address) {
            return Err(LinkError::InvalidAddressChecksum);
        }

        let params = LinkParams::from_url(&url);

        let timeout_at = params
            .timeout
            .and_then(|t| t.parse::<i64>().ok())
            .filter(|&t| pad_trits(&int_to_trits(t), TIMEOUT_TRITS).is_ok())
            .ok_or(LinkError::InvalidTimeout)?;

        if timeout_at <= self.clock.now() {
            return Err(LinkError::LinkExpired);
        }

        let expected_amount = match params.expected_amount.as_deref() {
            None | Some("") => 0,
            Some(amount) => amount
                .parse::<u64>()
                .map_err(|_| LinkError::InvalidAmount)?,
        };

        let multi_use =
            !matches!(params.multi_use.as_deref(), None | Some("false" | "0"));

        let cda = ConditionalDepositAddress {
            address,
            timeout_at,
            multi_use,
            expected_amount,
        };

        if cda.checksum()? != checksum {
            return Err(LinkError::ChecksumMismatch);
        }

        Ok(cda)
    }
}

/// Splits the 90-tryte segment of the link into address and checksum.
fn split_segment(url: &Url) -> Result<(Address, &str), LinkError> {
    let well_formed = url.username().is_empty()
        && url.password().is_none()
        && url.port().is_none()
        && url.fragment().is_none()
        && matches!(url.path(), "" | "/");
    if !well_formed {
        return Err(LinkError::MalformedLink);
    }

    let segment = url.host_str().ok_or(LinkError::MalformedLink)?;
    if segment.len() != ADDRESS_TRYTES + LINK_CHECKSUM_TRYTES
        || !is_trytes(segment)
    {
        return Err(LinkError::MalformedLink);
    }

    let (address, checksum) = segment.split_at(ADDRESS_TRYTES);
    let address = address.parse().map_err(|_| LinkError::MalformedLink)?;
    Ok((address, checksum))
}

/// Raw query parameters of a link, the first occurrence of a key wins.
#[derive(Default)]
struct LinkParams<'a> {
    timeout: Option<Cow<'a, str>>,
    multi_use: Option<Cow<'a, str>>,
    expected_amount: Option<Cow<'a, str>>,
}

impl<'a> LinkParams<'a> {
    fn from_url(url: &'a Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                TIMEOUT_KEY => &mut params.timeout,
                MULTI_USE_KEY => &mut params.multi_use,
                EXPECTED_AMOUNT_KEY => &mut params.expected_amount,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;

    const ADDRESS: &str = "XUERGHWTYRTFUYKFKXURKHMFEVLOIFTTCNTXOGLDPCZ9CJLKHROO\
                           PGNAQYFJEPGK9OKUQROUECBAVNXRX";
    const NOW: i64 = 1_554_209_843;

    fn codec() -> MagnetLinkCodec<FixedClock> {
        MagnetLinkCodec::with(FixedClock(NOW), KerlVerifier)
    }

    fn cda() -> ConditionalDepositAddress {
        ConditionalDepositAddress::new(
            ADDRESS.parse().unwrap(),
            NOW + 3600,
            false,
            1_000,
        )
    }

    fn with_query(cda: &ConditionalDepositAddress, query: &str) -> String {
        let checksum = cda.checksum().unwrap();
        format!("{LINK_SCHEME}{}{checksum}/?{query}", cda.address)
    }

    #[test]
    fn link_layout() {
        let cda = cda();
        let link = codec().encode(&cda).unwrap();
        let checksum = cda.checksum().unwrap();

        assert_eq!(checksum, "BAXWJNPQO");
        assert!(is_trytes(&checksum));
        assert_eq!(
            link,
            format!("iota://{ADDRESS}{checksum}/?t={}&m=0&am=1000", NOW + 3600)
        );
        assert_eq!(codec().decode(&link).unwrap(), cda);
    }

    #[test]
    fn known_link() {
        let cda = ConditionalDepositAddress::new(
            ADDRESS.parse().unwrap(),
            NOW + 60,
            false,
            0,
        );
        let link = codec().encode(&cda).unwrap();
        assert_eq!(
            link,
            format!("iota://{ADDRESS}9LVVAPDHX/?t=1554209903&m=0&am=0")
        );
        assert_eq!(codec().decode(&link).unwrap(), cda);
    }

    #[test]
    fn parameters_change_the_checksum() {
        let cda = cda();
        let checksum = cda.checksum().unwrap();

        let mut other = cda.clone();
        other.multi_use = true;
        assert_ne!(other.checksum().unwrap(), checksum);

        let mut other = cda.clone();
        other.timeout_at += 1;
        assert_ne!(other.checksum().unwrap(), checksum);

        let mut other = cda;
        other.expected_amount -= 1;
        assert_ne!(other.checksum().unwrap(), checksum);
    }

    #[test]
    fn encode_rejects_expired_and_oversized_timeouts() {
        let mut cda = cda();
        cda.timeout_at = NOW;
        assert_eq!(codec().encode(&cda), Err(LinkError::LinkExpired));

        cda.timeout_at = i64::MAX;
        assert_eq!(codec().encode(&cda), Err(LinkError::InvalidTimeout));
    }

    #[test]
    fn encode_rejects_unverified_addresses() {
        let codec = MagnetLinkCodec::with(FixedClock(NOW), |_: &Address| false);
        assert_eq!(
            codec.encode(&cda()),
            Err(LinkError::InvalidAddressChecksum)
        );
    }

    #[test]
    fn malformed_links() {
        let cda = cda();
        let link = codec().encode(&cda).unwrap();
        let segment = &link[LINK_SCHEME.len()..LINK_SCHEME.len() + 90];

        let cases = [
            String::new(),
            "iota:/".to_string(),
            link.replacen("iota://", "http://", 1),
            link.replacen("iota://", "IOTA://", 1),
            format!("iota://{}/?t={}", &segment[1..], NOW + 3600),
            format!("iota://{segment}9/?t={}", NOW + 3600),
            format!("iota://{}/?t={}", segment.to_lowercase(), NOW + 3600),
            format!("iota://{segment}/path?t={}", NOW + 3600),
            format!("iota://{segment}:80/?t={}", NOW + 3600),
            format!("iota://user@{segment}/?t={}", NOW + 3600),
            format!("{link}#fragment"),
        ];
        for case in cases {
            assert_eq!(
                codec().decode(&case),
                Err(LinkError::MalformedLink),
                "{case}"
            );
        }
    }

    #[test]
    fn invalid_address_checksum() {
        let cda = cda();
        let link = codec().encode(&cda).unwrap();
        let codec = MagnetLinkCodec::with(FixedClock(NOW), |_: &Address| false);
        assert_eq!(codec.decode(&link), Err(LinkError::InvalidAddressChecksum));

        // the 81st tryte `M` leaves a non-zero last trit
        let mut trytes = ADDRESS[..80].to_string();
        trytes.push('M');
        let link = format!("iota://{trytes}999999999/?t={}", NOW + 3600);
        assert_eq!(
            self::codec().decode(&link),
            Err(LinkError::InvalidAddressChecksum)
        );
    }

    #[test]
    fn invalid_timeouts() {
        let cda = cda();
        for query in [
            "m=0&am=1000".to_string(),
            "t=&m=0".to_string(),
            "t=soon&m=0".to_string(),
            "t=1.5".to_string(),
            format!("t={}", i64::MAX),
            "t=99999999999999999999999".to_string(),
            format!("timeout_at={}", NOW + 3600),
        ] {
            assert_eq!(
                codec().decode(&with_query(&cda, &query)),
                Err(LinkError::InvalidTimeout),
                "{query}"
            );
        }
    }

    #[test]
    fn expiry_boundary() {
        let mut cda = cda();
        cda.timeout_at = NOW + 1;
        let link = cda.magnet_link().unwrap();
        assert_eq!(codec().decode(&link).unwrap(), cda);

        cda.timeout_at = NOW;
        let link = cda.magnet_link().unwrap();
        assert_eq!(codec().decode(&link), Err(LinkError::LinkExpired));

        cda.timeout_at = -5;
        let link = cda.magnet_link().unwrap();
        assert_eq!(codec().decode(&link), Err(LinkError::LinkExpired));

        // expiration is checked against the clock at every call
        let link = self::cda().magnet_link().unwrap();
        let later = MagnetLinkCodec::with(FixedClock(NOW + 3600), KerlVerifier);
        assert!(codec().validate(&link));
        assert!(!later.validate(&link));
    }

    #[test]
    fn invalid_amounts() {
        let cda = cda();
        for amount in ["-1", "ten", "1.5", "18446744073709551616"] {
            let query = format!("t={}&m=0&am={amount}", cda.timeout_at);
            assert_eq!(
                codec().decode(&with_query(&cda, &query)),
                Err(LinkError::InvalidAmount),
                "{amount}"
            );
        }
    }

    #[test]
    fn default_amount_and_multi_use() {
        let mut cda = cda();
        cda.expected_amount = 0;

        for query in [
            format!("t={}", cda.timeout_at),
            format!("t={}&am=", cda.timeout_at),
            format!("t={}&m=false&am=0", cda.timeout_at),
        ] {
            let decoded = codec().decode(&with_query(&cda, &query)).unwrap();
            assert_eq!(decoded, cda, "{query}");
        }

        // A present but empty `m` still marks the link as multi-use.
        cda.multi_use = true;
        for value in ["", "1", "true", "yes"] {
            let query = format!("t={}&m={value}", cda.timeout_at);
            let decoded = codec().decode(&with_query(&cda, &query)).unwrap();
            assert!(decoded.multi_use, "{value}");
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let cda = cda();
        let query = format!(
            "t={}&t={}&m=0&am=1000&am=5",
            cda.timeout_at,
            cda.timeout_at + 1
        );
        assert_eq!(codec().decode(&with_query(&cda, &query)).unwrap(), cda);
    }

    #[test]
    fn tampered_links() {
        let cda = cda();
        let link = cda.magnet_link().unwrap();

        let tampered = [
            link.replace("m=0", "m=1"),
            link.replace("am=1000", "am=1001"),
            link.replace("am=1000", "am=999"),
            link.replace(
                &format!("t={}", cda.timeout_at),
                &format!("t={}", cda.timeout_at + 1),
            ),
        ];
        for link in tampered {
            assert_eq!(
                codec().decode(&link),
                Err(LinkError::ChecksumMismatch),
                "{link}"
            );
        }
    }
}
