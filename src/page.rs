use chrono::{DateTime, Utc};
use handlebars::{Handlebars, handlebars_helper};
use serde_json::{Value, json};

use crate::content::{InvitationContent, Person};
use crate::countdown::{COUNTDOWN_INTERVAL_MS, Countdown};
use crate::error::{InvitationError, Result};
use crate::guest::GuestName;
use crate::navigation::SectionNav;
use crate::rotation::{BACKDROP_INTERVAL_MS, Carousel, Fade, ImagePool, PORTRAIT_INTERVAL_MS};

const PAGE_TEMPLATE: &str = "invitation";

handlebars_helper!(even: |index: u64| index % 2 == 0);
handlebars_helper!(inc: |index: u64| index + 1);

/// Which of the two page variants to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVariant {
    /// Cover screen in front of the (hidden) invitation, opened with a button
    Cover,
    /// Invitation shown directly
    Main,
}

/// Server-side renderer for the invitation page
///
/// Templates are compiled once when the renderer is created. All values are
/// HTML-escaped, so a guest name like `<b>Budi</b>` shows up as text.
pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    /// Compiles the page template and its partials
    ///
    /// # Errors
    /// * `InvitationError::Template` if a template fails to compile
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_helper("even", Box::new(even));
        registry.register_helper("inc", Box::new(inc));

        let partials = [
            ("head", include_str!("./templates/head.hbs")),
            ("backdrop", include_str!("./templates/backdrop.hbs")),
            ("portrait", include_str!("./templates/portrait.hbs")),
            ("cover", include_str!("./templates/cover.hbs")),
            ("countdown", include_str!("./templates/countdown.hbs")),
            ("gifts", include_str!("./templates/gifts.hbs")),
        ];
        for (name, source) in partials {
            registry
                .register_partial(name, source)
                .map_err(InvitationError::Template)?;
        }
        registry
            .register_template_string(PAGE_TEMPLATE, include_str!("./templates/invitation.hbs"))
            .map_err(InvitationError::Template)?;

        Ok(Self { registry })
    }

    /// Renders the full HTML page for one guest
    ///
    /// # Arguments
    /// * `content` - Invitation text and media
    /// * `guest` - Guest the page is addressed to
    /// * `variant` - Whether to start on the cover screen
    /// * `now` - Instant used for the initial countdown values
    pub fn render(
        &self,
        content: &InvitationContent,
        guest: &GuestName,
        variant: PageVariant,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let context = page_context(content, guest, variant, now)?;
        self.registry
            .render(PAGE_TEMPLATE, &context)
            .map_err(InvitationError::Render)
    }
}

/// Countdown values as shown on the page and returned by the API
///
/// Fields are left out entirely once the target has arrived.
pub fn countdown_context(content: &InvitationContent, now: DateTime<Utc>) -> Value {
    let target = content.countdown_target();
    let countdown = Countdown::new(target, now);
    let fields: Vec<Value> = countdown
        .display_fields()
        .into_iter()
        .map(|(label, value)| json!({ "label": label, "value": value }))
        .collect();

    json!({
        "heading": content.countdown.heading,
        "arrived_text": content.countdown.arrived_text,
        "arrived": countdown.has_arrived(),
        "fields": fields,
        "target_ms": target.instant().map(|t| t.timestamp_millis()),
        "interval_ms": COUNTDOWN_INTERVAL_MS,
    })
}

fn carousel_context(pool: ImagePool, fade: Fade, interval_ms: u64) -> Value {
    let carousel = Carousel::new(pool, fade);
    json!({
        "interval_ms": interval_ms,
        "dimmed": fade.dimmed_opacity,
        "focused_z": fade.focused_z,
        "layers": carousel.layers(),
    })
}

fn person_context(person: &Person, pool: ImagePool) -> Value {
    let mut context = carousel_context(pool, Fade::PORTRAIT, PORTRAIT_INTERVAL_MS);
    context["name"] = json!(person.name);
    context["parents"] = json!(person.parents);
    context
}

fn page_context(
    content: &InvitationContent,
    guest: &GuestName,
    variant: PageVariant,
    now: DateTime<Utc>,
) -> Result<Value> {
    let nav = SectionNav::new(content.sections.clone());
    let sections: Vec<Value> = nav
        .sections()
        .iter()
        .map(|s| json!({ "id": s.id, "label": s.label, "active": nav.is_active(&s.id) }))
        .collect();

    Ok(json!({
        "content": content,
        "guest": guest.as_str(),
        "guest_query": guest.to_query(),
        "show_cover": variant == PageVariant::Cover,
        "backdrop": carousel_context(content.cover_pool()?, Fade::BACKDROP, BACKDROP_INTERVAL_MS),
        "bride": person_context(&content.bride, content.bride_pool()?),
        "groom": person_context(&content.groom, content.groom_pool()?),
        "countdown": countdown_context(content, now),
        "sections": sections,
    }))
}
