use std::rc::Rc;

use log::{info, warn};
use yew::prelude::*;

use crate::components::animated_section::AnimatedSection;
use crate::components::carnation::{Carnation, FloatingParticles};
use crate::content::{Contact, InvitationData, ItineraryItem};
use crate::countdown::{use_countdown, TargetInstant};
use crate::links::{calendar_url, map_url, open_in_new_tab, tel_uri, CalendarEvent};

const COUNTDOWN_LABELS: [&str; 4] = ["Días", "Horas", "Minutos", "Segundos"];

#[derive(Properties, PartialEq)]
pub struct SectionProps {
    pub data: Rc<InvitationData>,
    #[prop_or_default]
    pub target: Option<TargetInstant>,
}

#[function_component(Invitation)]
pub fn invitation() -> Html {
    let data = use_memo(|_| InvitationData::bundled(), ());
    let target = {
        let data = data.clone();
        *use_memo(
            move |_| match data.event.target() {
                Ok(target) => Some(target),
                Err(e) => {
                    warn!("Countdown disabled: {}", e);
                    None
                }
            },
            (),
        )
    };

    html! {
        <div class="invitation">
            <FloatingParticles />
            <Hero data={data.clone()} />
            <CountdownSection data={data.clone()} target={target} />
            <EventDetails data={data.clone()} target={target} />
            <Itinerary data={data.clone()} />
            <GiftsSection data={data.clone()} />
            <DressCodeSection data={data.clone()} />
            <ContactSection data={data} />
            <style>{STYLES}</style>
        </div>
    }
}

#[function_component(Hero)]
fn hero(props: &SectionProps) -> Html {
    let data = &props.data;
    html! {
        <section class="hero">
            <div class="hero__backdrop"></div>
            <div class="hero__flower hero__flower--top-left">
                <Carnation class="faded" size={5.0} />
            </div>
            <div class="hero__flower hero__flower--bottom-right">
                <Carnation class="faded" size={4.0} />
            </div>
            <div class="hero__flower hero__flower--right">
                <Carnation class="faded" size={6.0} />
            </div>
            <AnimatedSection class="hero__content">
                <h1 class="hero__title">{"XV AÑOS"}</h1>
                <div class="hero__name-row">
                    <span class="heart">{"♥"}</span>
                    <h2 class="hero__name">{&data.celebrant.name}</h2>
                    <span class="heart heart--late">{"♥"}</span>
                </div>
                <p class="hero__welcome">{&data.messages.welcome}</p>
                <div class="hero__date">{&data.event.date_text}</div>
            </AnimatedSection>
            <div class="hero__scroll-hint">
                <div class="hero__scroll-dot"></div>
            </div>
        </section>
    }
}

#[function_component(CountdownSection)]
fn countdown_section(props: &SectionProps) -> Html {
    let left = use_countdown(props.target);
    let values = [
        left.days,
        u64::from(left.hours),
        u64::from(left.minutes),
        u64::from(left.seconds),
    ];
    let cells = values.iter().zip(COUNTDOWN_LABELS).enumerate().map(|(index, (value, label))| {
        html! {
            <AnimatedSection key={label} delay={index as u32 * 100} class="countdown__cell">
                <div class="countdown__value">{format!("{:02}", value)}</div>
                <div class="countdown__label">{label}</div>
            </AnimatedSection>
        }
    });

    html! {
        <section class={classes!("countdown", left.is_zero().then(|| "countdown--done"))}>
            <AnimatedSection class="container">
                <h2 class="section-title">{&props.data.messages.countdown}</h2>
                <div class="countdown__grid">
                    { for cells }
                </div>
            </AnimatedSection>
        </section>
    }
}

#[function_component(EventDetails)]
fn event_details(props: &SectionProps) -> Html {
    let data = &props.data;

    let add_to_calendar = {
        let event = CalendarEvent::from_content(&data.calendar, &data.venue, props.target);
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            info!("Adding event to calendar");
            open_in_new_tab(&calendar_url(&event));
        })
    };

    let schedule = match (data.event.start_time.is_empty(), data.event.end_time.is_empty()) {
        (false, false) => format!("{} - {}", data.event.start_time, data.event.end_time),
        (false, true) => data.event.start_time.clone(),
        (true, false) => data.event.end_time.clone(),
        (true, true) => String::new(),
    };

    let city_line = [data.venue.neighborhood.as_str(), data.venue.city.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <section class="details tinted">
            <div class="details__flower">
                <Carnation class="faded spin" size={8.0} />
            </div>
            <AnimatedSection class="container">
                <h2 class="section-title">{"Detalles del Evento"}</h2>
                <div class="details__grid">
                    <AnimatedSection delay={200} class="card">
                        <div class="card__header">
                            <span class="card__icon">{"📅"}</span>
                            <h3>{"Fecha y Hora"}</h3>
                        </div>
                        <div class="card__body">
                            <p>{"🕒 "}{&data.event.date_text}</p>
                            if !schedule.is_empty() {
                                <p>{"🕒 "}{schedule}</p>
                            }
                        </div>
                        <button class="button button--primary" onclick={add_to_calendar}>
                            {"＋ Agregar al Calendario"}
                        </button>
                    </AnimatedSection>
                    <AnimatedSection delay={400} class="card">
                        <div class="card__header">
                            <span class="card__icon">{"📍"}</span>
                            <h3>{"Lugar"}</h3>
                        </div>
                        <div class="card__body">
                            <p class="card__emphasis">{&data.venue.name}</p>
                            <p>{&data.venue.address}</p>
                            <p>{city_line}</p>
                        </div>
                        {
                            if let Some(url) = map_url(&data.venue) {
                                html! {
                                    <a
                                        class="button button--map"
                                        href={url.to_string()}
                                        target="_blank"
                                        rel="noopener noreferrer"
                                    >
                                        {"↗ Ver en Google Maps"}
                                    </a>
                                }
                            } else {
                                html! {}
                            }
                        }
                    </AnimatedSection>
                </div>
            </AnimatedSection>
        </section>
    }
}

fn icon_glyph(name: &str) -> &'static str {
    match name.trim().to_lowercase().as_str() {
        "church" | "iglesia" | "misa" => "⛪",
        "music" | "musica" | "música" | "baile" => "♫",
        "utensils" | "cena" | "comida" => "🍽",
        "camera" | "fotos" => "📷",
        "heart" | "vals" => "♥",
        "gift" | "regalo" => "🎁",
        _ => "🕒",
    }
}

/// Program of the night. Only shown when the document lists entries.
#[function_component(Itinerary)]
fn itinerary(props: &SectionProps) -> Html {
    let items: &[ItineraryItem] = &props.data.itinerary;
    if items.is_empty() {
        return html! {};
    }

    html! {
        <section class="itinerary">
            <div class="itinerary__flower">
                <Carnation class="faded" size={6.0} />
            </div>
            <AnimatedSection class="container container--narrow">
                <h2 class="section-title">{"Itinerario"}</h2>
                <div class="itinerary__list">
                    { for items.iter().enumerate().map(|(index, item)| html! {
                        <AnimatedSection
                            key={index}
                            delay={index as u32 * 150}
                            class="itinerary__item"
                        >
                            <div class="itinerary__icon">{icon_glyph(&item.icon)}</div>
                            <div class="itinerary__text">
                                <div class="itinerary__heading">
                                    <span class="itinerary__time">{&item.time}</span>
                                    <span class="itinerary__title">{&item.title}</span>
                                </div>
                                <p>{&item.description}</p>
                            </div>
                        </AnimatedSection>
                    }) }
                </div>
            </AnimatedSection>
        </section>
    }
}

#[function_component(GiftsSection)]
fn gifts_section(props: &SectionProps) -> Html {
    let gifts = &props.data.gifts;
    html! {
        <section class="gifts">
            <div class="gifts__flower">
                <Carnation class="faded" size={6.0} />
            </div>
            <AnimatedSection class="container container--narrow">
                <h2 class="section-title">{&gifts.title}</h2>
                <div class="panel tinted">
                    <AnimatedSection delay={200} class="centered">
                        <div class="gifts__badge">{"🎁"}</div>
                        <p class="gifts__message">{&gifts.message}</p>
                        <div class="gifts__envelope">
                            <span class="heart">{"♥"}</span>
                            {&gifts.envelope_shower}
                            <span class="heart heart--late">{"♥"}</span>
                        </div>
                    </AnimatedSection>
                </div>
            </AnimatedSection>
        </section>
    }
}

#[function_component(DressCodeSection)]
fn dress_code_section(props: &SectionProps) -> Html {
    let dress = &props.data.dress_code;
    let avoided = dress.colors_to_avoid.iter().enumerate().map(|(index, color)| {
        let delay = format!("animation-delay: {:.1}s;", index as f64 * 0.1 + 0.5);
        html! { <li style={delay}>{"• "}{color}</li> }
    });
    html! {
        <section class="dress-code tinted">
            <div class="dress-code__glow"></div>
            <AnimatedSection class="container container--narrow">
                <h2 class="section-title">{"Código de Vestimenta"}</h2>
                <div class="panel">
                    <AnimatedSection delay={200} class="centered">
                        <h3 class="dress-code__kind">{&dress.kind}</h3>
                        <p>{&dress.description}</p>
                    </AnimatedSection>
                    if !dress.suggestions.is_empty() {
                        <AnimatedSection delay={400} class="centered">
                            <h4>{"Sugerencias"}</h4>
                            <ul class="plain-list">
                                { for dress.suggestions.iter().map(|s| {
                                    html! { <li>{"• "}{s}</li> }
                                }) }
                            </ul>
                        </AnimatedSection>
                    }
                    if !dress.colors_to_avoid.is_empty() {
                        <AnimatedSection delay={600} class="centered">
                            <h4 class="dress-code__warning">{"Colores a Evitar:"}</h4>
                            <ul class="plain-list dress-code__colors">
                                { for avoided }
                            </ul>
                        </AnimatedSection>
                    }
                </div>
            </AnimatedSection>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ContactLinkProps {
    contact: Contact,
}

#[function_component(ContactLink)]
fn contact_link(props: &ContactLinkProps) -> Html {
    let contact = &props.contact;
    let label = if contact.phone.is_empty() {
        contact.name.clone()
    } else {
        format!("{}: {}", contact.name, contact.phone)
    };
    let dial = if contact.dial_phone.is_empty() { &contact.phone } else { &contact.dial_phone };

    html! {
        <a class="contact__link" href={tel_uri(dial)}>
            <span class="contact__icon">{"📞"}</span>
            <span>{label}</span>
        </a>
    }
}

#[function_component(ContactSection)]
fn contact_section(props: &SectionProps) -> Html {
    let data = &props.data;
    html! {
        <section class="contact">
            <FloatingParticles />
            <AnimatedSection class="container container--narrow centered">
                <h2 class="section-title section-title--light">{"Contacto"}</h2>
                <div class="glass">
                    <AnimatedSection delay={200}>
                        <p class="contact__intro">{&data.messages.contact}</p>
                    </AnimatedSection>
                    <div class="contact__list">
                        { for data.contacts.iter().enumerate().map(|(index, (key, contact))| html! {
                            <AnimatedSection key={key.clone()} delay={400 + index as u32 * 200}>
                                <ContactLink contact={contact.clone()} />
                            </AnimatedSection>
                        }) }
                    </div>
                    <AnimatedSection delay={800} class="contact__closing">
                        <p>{&data.messages.presence}</p>
                        <div class="contact__signature">
                            <span class="heart">{"♥"}</span>
                            <span class="script">{&data.celebrant.name}</span>
                            <span class="heart heart--late">{"♥"}</span>
                        </div>
                    </AnimatedSection>
                </div>
            </AnimatedSection>
        </section>
    }
}

const STYLES: &str = r#"
    .invitation {
        min-height: 100vh;
        position: relative;
        overflow: hidden;
        background: linear-gradient(to bottom, #fff1f2, #fef2f2);
        font-family: "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
        color: #4b5563;
    }
    .invitation section {
        position: relative;
        overflow: hidden;
        padding: 4rem 0;
    }
    .container {
        position: relative;
        z-index: 10;
        max-width: 72rem;
        margin: 0 auto;
        padding: 0 1.5rem;
    }
    .container--narrow {
        max-width: 56rem;
    }
    .centered {
        text-align: center;
    }
    .tinted {
        background: linear-gradient(135deg, #fff1f2, #fef2f2);
    }
    .faded {
        opacity: 0.15;
    }
    .spin {
        animation: spin 20s linear infinite;
    }
    .section-title {
        font-size: 2.25rem;
        font-weight: 700;
        color: #dc2626;
        text-align: center;
        margin-bottom: 3rem;
    }
    .section-title--light {
        color: #ffffff;
    }
    .script {
        font-family: "Great Vibes", cursive;
    }
    .heart {
        display: inline-block;
        margin: 0 0.75rem;
        color: #fecdd3;
        animation: heartbeat 1.5s ease-in-out infinite;
    }
    .heart--late {
        animation-delay: 0.5s;
    }

    .reveal {
        opacity: 0;
        transform: translateY(2.5rem) scale(0.95);
        transition: opacity 1s ease-out, transform 1s ease-out;
    }
    .reveal.reveal--visible {
        opacity: 1;
        transform: translateY(0) scale(1);
    }

    .carnation {
        position: relative;
    }
    .carnation__petal {
        position: absolute;
        border-radius: 9999px;
        animation: pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite;
    }
    .carnation__petal--outer {
        inset: 0;
        background: #fca5a5;
        opacity: 0.6;
    }
    .carnation__petal--middle {
        inset: 0.25rem;
        background: #f87171;
        opacity: 0.8;
        animation-delay: 0.5s;
    }
    .carnation__petal--inner {
        inset: 0.5rem;
        background: #ef4444;
        animation-delay: 1s;
    }
    .particles {
        position: absolute;
        inset: 0;
        overflow: hidden;
        pointer-events: none;
    }
    .particle {
        position: absolute;
        opacity: 0.2;
        animation: float 5s ease-in-out infinite;
    }

    .invitation section.hero {
        min-height: 100vh;
        display: flex;
        align-items: center;
        justify-content: center;
        padding: 0;
    }
    .hero__backdrop {
        position: absolute;
        inset: 0;
        background: linear-gradient(135deg, #dc2626, #ef4444, #e11d48);
    }
    .hero__flower {
        position: absolute;
        animation: bounce-slow 3s ease-in-out infinite;
    }
    .hero__flower--top-left { top: 2.5rem; left: 2.5rem; }
    .hero__flower--bottom-right { bottom: 5rem; right: 2.5rem; animation-delay: 1s; }
    .hero__flower--right { top: 33%; right: 5rem; animation-delay: 2s; }
    .hero__content {
        position: relative;
        z-index: 10;
        text-align: center;
        color: #ffffff;
        padding: 0 1.5rem;
        max-width: 56rem;
    }
    .hero__title {
        font-size: clamp(3.75rem, 10vw, 6rem);
        font-weight: 700;
        letter-spacing: 0.05em;
        margin-bottom: 1rem;
        text-shadow: 0 0 20px rgba(255, 255, 255, 0.5);
    }
    .hero__name-row {
        display: flex;
        align-items: center;
        justify-content: center;
        margin-bottom: 1.5rem;
    }
    .hero__name {
        font-family: "Great Vibes", cursive;
        font-size: clamp(2.25rem, 6vw, 3rem);
        color: #ffe4e6;
    }
    .hero__welcome {
        font-size: 1.25rem;
        font-weight: 300;
        color: #ffe4e6;
        margin-bottom: 2rem;
    }
    .hero__date {
        font-size: 1.75rem;
        font-weight: 600;
    }
    .hero__scroll-hint {
        position: absolute;
        bottom: 2.5rem;
        left: 50%;
        transform: translateX(-50%);
        width: 1.5rem;
        height: 2.5rem;
        border: 2px solid #ffffff;
        border-radius: 9999px;
        display: flex;
        justify-content: center;
        animation: bounce-slow 2s ease-in-out infinite;
    }
    .hero__scroll-dot {
        width: 0.25rem;
        height: 0.75rem;
        margin-top: 0.5rem;
        background: #ffffff;
        border-radius: 9999px;
        animation: pulse 2s infinite;
    }

    .invitation section.countdown {
        background: #ffffff;
        text-align: center;
    }
    .countdown__grid {
        display: grid;
        grid-template-columns: repeat(2, 1fr);
        gap: 1.5rem;
    }
    .countdown__cell {
        background: linear-gradient(135deg, #ef4444, #dc2626);
        border-radius: 1rem;
        padding: 1.5rem;
        color: #ffffff;
        box-shadow: 0 20px 25px -5px rgba(0, 0, 0, 0.1);
    }
    .countdown__value {
        font-size: 2.5rem;
        font-weight: 700;
        margin-bottom: 0.5rem;
        font-variant-numeric: tabular-nums;
    }
    .countdown--done .countdown__cell {
        background: linear-gradient(135deg, #f87171, #ef4444);
    }
    .countdown__label {
        font-size: 1.125rem;
        font-weight: 600;
        opacity: 0.9;
    }

    .details__flower,
    .gifts__flower,
    .itinerary__flower {
        position: absolute;
        top: 2.5rem;
    }
    .details__flower { right: 2.5rem; }
    .gifts__flower,
    .itinerary__flower { left: 2.5rem; }
    .details__grid {
        display: grid;
        gap: 2rem;
    }
    .card,
    .panel {
        background: #ffffff;
        border-radius: 1rem;
        padding: 2rem;
        box-shadow: 0 20px 25px -5px rgba(0, 0, 0, 0.1);
    }
    .panel.tinted {
        background: linear-gradient(135deg, #fff1f2, #fef2f2);
    }
    .card__header {
        display: flex;
        align-items: center;
        margin-bottom: 1.5rem;
    }
    .card__header h3 {
        font-size: 1.5rem;
        font-weight: 700;
        color: #1f2937;
    }
    .card__icon {
        font-size: 2rem;
        margin-right: 1rem;
    }
    .card__body p {
        font-size: 1.125rem;
        margin: 0.5rem 0;
    }
    .card__emphasis {
        font-weight: 600;
        color: #1f2937;
    }
    .button {
        display: flex;
        align-items: center;
        justify-content: center;
        width: 100%;
        margin-top: 1.5rem;
        padding: 0.75rem 1.5rem;
        border: none;
        border-radius: 0.5rem;
        color: #ffffff;
        font-weight: 600;
        font-size: 1rem;
        text-decoration: none;
        cursor: pointer;
        transition: transform 0.3s, background 0.3s;
    }
    .button:hover {
        transform: scale(1.05);
    }
    .button--primary { background: #ef4444; }
    .button--primary:hover { background: #dc2626; }
    .button--map { background: #3b82f6; }
    .button--map:hover { background: #2563eb; }

    .invitation section.itinerary,
    .invitation section.gifts {
        background: #ffffff;
    }
    .itinerary__list {
        display: flex;
        flex-direction: column;
        gap: 2rem;
    }
    .itinerary__item {
        display: flex;
        align-items: center;
        background: linear-gradient(to right, #fff1f2, #fef2f2);
        border-radius: 1rem;
        padding: 1.5rem;
    }
    .itinerary__icon {
        background: #ef4444;
        color: #ffffff;
        border-radius: 9999px;
        padding: 1rem;
        margin-right: 1.5rem;
        font-size: 1.5rem;
    }
    .itinerary__time {
        font-weight: 700;
        color: #dc2626;
        margin-right: 1rem;
    }
    .itinerary__title {
        font-size: 1.25rem;
        font-weight: 600;
        color: #1f2937;
    }

    .gifts__badge {
        display: inline-block;
        background: #ef4444;
        border-radius: 9999px;
        padding: 1.5rem;
        font-size: 3rem;
        margin-bottom: 1.5rem;
    }
    .gifts__message {
        font-size: 1.125rem;
        line-height: 1.75;
        margin-bottom: 1.5rem;
    }
    .gifts__envelope {
        background: #ffffff;
        border-radius: 0.5rem;
        padding: 1.5rem;
        font-size: 1.25rem;
        font-weight: 600;
        color: #dc2626;
    }
    .gifts__envelope .heart {
        color: #dc2626;
    }

    .dress-code__glow {
        position: absolute;
        top: 50%;
        right: 0;
        width: 16rem;
        height: 16rem;
        transform: translateX(50%);
        background: #fee2e2;
        border-radius: 9999px;
        opacity: 0.2;
    }
    .dress-code__kind {
        font-size: 1.5rem;
        font-weight: 700;
        color: #1f2937;
        margin-bottom: 1rem;
    }
    .dress-code__warning {
        font-size: 1.25rem;
        font-weight: 600;
        color: #dc2626;
        margin: 2rem 0 1rem;
    }
    .plain-list {
        list-style: none;
        padding: 0;
    }
    .dress-code__colors {
        background: #fef2f2;
        border-radius: 0.5rem;
        padding: 1rem;
        color: #ef4444;
    }
    .dress-code__colors li {
        animation: appear 0.6s ease-out both;
    }

    .invitation section.contact {
        background: linear-gradient(135deg, #dc2626, #e11d48);
        color: #ffffff;
    }
    .glass {
        background: rgba(255, 255, 255, 0.1);
        backdrop-filter: blur(4px);
        border-radius: 1rem;
        padding: 2rem;
    }
    .contact__intro {
        font-size: 1.25rem;
        margin-bottom: 1.5rem;
    }
    .contact__list {
        display: flex;
        flex-direction: column;
        align-items: center;
        gap: 1rem;
    }
    .contact__link {
        display: flex;
        align-items: center;
        background: rgba(255, 255, 255, 0.2);
        padding: 0.75rem 1.5rem;
        border-radius: 0.5rem;
        color: #ffffff;
        font-weight: 600;
        text-decoration: none;
    }
    .contact__link:hover {
        background: rgba(255, 255, 255, 0.3);
    }
    .contact__icon {
        margin-right: 0.75rem;
    }
    .contact__closing {
        margin-top: 2rem;
        padding-top: 2rem;
        border-top: 1px solid rgba(255, 255, 255, 0.2);
        color: #ffe4e6;
    }
    .contact__signature {
        display: flex;
        align-items: center;
        justify-content: center;
        margin-top: 1rem;
        font-size: 1.5rem;
    }

    @media (min-width: 768px) {
        .countdown__grid { grid-template-columns: repeat(4, 1fr); }
        .details__grid { grid-template-columns: repeat(2, 1fr); }
        .countdown__value { font-size: 3rem; }
        .contact__list { flex-direction: row; justify-content: center; gap: 2rem; }
    }

    @keyframes pulse {
        50% { opacity: 0.5; }
    }
    @keyframes spin {
        to { transform: rotate(360deg); }
    }
    @keyframes float {
        0%, 100% { transform: translateY(0) rotate(0deg); }
        50% { transform: translateY(-1.25rem) rotate(180deg); }
    }
    @keyframes bounce-slow {
        0%, 100% { transform: translateY(0); }
        50% { transform: translateY(-0.75rem); }
    }
    @keyframes heartbeat {
        0%, 100% { transform: scale(1); }
        50% { transform: scale(1.15); }
    }
    @keyframes appear {
        from { opacity: 0; transform: translateX(-0.5rem); }
        to { opacity: 1; transform: translateX(0); }
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_icons_fall_back_to_clock() {
        assert_eq!(icon_glyph("Iglesia"), "⛪");
        assert_eq!(icon_glyph(" music "), "♫");
        assert_eq!(icon_glyph("sparkles"), "🕒");
        assert_eq!(icon_glyph(""), "🕒");
    }
}
