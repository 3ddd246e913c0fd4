//! Offer derivation rules: badge text, discount percent, mirror fields

use shared::models::{
    BogoType, DEFAULT_BADGE, MenuCategory, MenuItem, OfferType, SpecialOffer, SpecialOfferCreate,
    SpecialOfferUpdate,
};

use crate::db::repository::menu_item::mirror_description;
use crate::pricing::{discount_percent, to_decimal};

/// Badge implied by the offer type
pub fn derive_badge(
    offer_type: OfferType,
    bogo_type: Option<BogoType>,
    percentage_off: Option<f64>,
) -> String {
    match offer_type {
        OfferType::Combo => "COMBO DEAL".to_string(),
        OfferType::Weekend => "WEEKEND SPECIAL".to_string(),
        OfferType::Bogo => match bogo_type {
            Some(BogoType::Buy1get1free) => "BUY 1 GET 1 FREE".to_string(),
            _ => "BOGO OFFER".to_string(),
        },
        OfferType::Percentage => format!("{}% OFF", percentage_off.unwrap_or_default()),
        OfferType::Custom => DEFAULT_BADGE.to_string(),
    }
}

fn badge_of(offer: &SpecialOffer) -> String {
    derive_badge(offer.offer_type, offer.bogo_type, offer.percentage_off)
}

/// Empty or default badges are replaced by the derived one
fn is_placeholder_badge(badge: &str) -> bool {
    let badge = badge.trim();
    badge.is_empty() || badge == DEFAULT_BADGE
}

/// Build a new offer row (not yet persisted, no mirror yet)
pub fn new_offer(data: SpecialOfferCreate) -> SpecialOffer {
    let now = shared::util::now_millis();
    let mut offer = SpecialOffer {
        id: shared::util::snowflake_id(),
        name: data.name.trim().to_string(),
        description: data.description.trim().to_string(),
        offer_type: data.offer_type,
        items: data.items.unwrap_or_default(),
        original_price: data.original_price,
        offer_price: data.offer_price,
        discount: 0,
        image: data.image,
        active: true,
        valid_days: data.valid_days.unwrap_or_default(),
        bogo_type: data.bogo_type,
        percentage_off: data.percentage_off,
        custom_rules: data.custom_rules.unwrap_or_default(),
        badge_text: data.badge_text.unwrap_or_default(),
        allow_coupons: data.allow_coupons.unwrap_or(false),
        menu_item_id: None,
        created_at: now,
        updated_at: now,
    };
    offer.discount = discount_percent(offer.original_price, offer.offer_price);
    if is_placeholder_badge(&offer.badge_text) {
        offer.badge_text = badge_of(&offer);
    }
    offer
}

/// Merge an update into an offer and re-derive computed fields
///
/// A badge that was derived from the old fields follows the new ones;
/// an explicit custom badge is kept.
pub fn apply_update(offer: &mut SpecialOffer, data: SpecialOfferUpdate) {
    let badge_was_derived =
        is_placeholder_badge(&offer.badge_text) || offer.badge_text == badge_of(offer);

    if let Some(name) = data.name {
        offer.name = name.trim().to_string();
    }
    if let Some(description) = data.description {
        offer.description = description.trim().to_string();
    }
    if let Some(offer_type) = data.offer_type {
        offer.offer_type = offer_type;
    }
    if let Some(items) = data.items {
        offer.items = items;
    }
    if let Some(original_price) = data.original_price {
        offer.original_price = original_price;
    }
    if let Some(offer_price) = data.offer_price {
        offer.offer_price = offer_price;
    }
    if data.image.is_some() {
        offer.image = data.image;
    }
    if let Some(active) = data.active {
        offer.active = active;
    }
    if let Some(valid_days) = data.valid_days {
        offer.valid_days = valid_days;
    }
    if data.bogo_type.is_some() {
        offer.bogo_type = data.bogo_type;
    }
    if data.percentage_off.is_some() {
        offer.percentage_off = data.percentage_off;
    }
    if let Some(custom_rules) = data.custom_rules {
        offer.custom_rules = custom_rules;
    }
    if let Some(allow_coupons) = data.allow_coupons {
        offer.allow_coupons = allow_coupons;
    }

    match data.badge_text {
        Some(badge) if !is_placeholder_badge(&badge) => offer.badge_text = badge.trim().to_string(),
        Some(_) => offer.badge_text = badge_of(offer),
        None if badge_was_derived => offer.badge_text = badge_of(offer),
        None => {}
    }
    offer.discount = discount_percent(offer.original_price, offer.offer_price);
    offer.updated_at = shared::util::now_millis();
}

/// Whether a mirror row reflects its offer
pub fn mirror_matches(item: &MenuItem, offer: &SpecialOffer) -> bool {
    item.name == offer.name
        && item.description == mirror_description(&offer.description)
        && to_decimal(item.price) == to_decimal(offer.offer_price)
        && item.category == MenuCategory::Special
        && item.image == offer.image
        && item.available == offer.active
        && item.is_special_offer
        && item.special_offer_id == Some(offer.id)
}
