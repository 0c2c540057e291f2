//! Prompt construction for page generation and field suggestions

use crate::types::{GenerationRequest, ProductBrief, ProductCategory, Tone};

/// Replaces a blank description
pub const INFER_DESCRIPTION: &str = "NOT PROVIDED. Invent a highly attractive, persuasive description that sells, based on the product name. Present it as if it were a best-seller.";

/// Replaces a blank target audience
pub const INFER_TARGET_AUDIENCE: &str = "NOT PROVIDED. Analyse the product and decide the most relevant and promising target audience for it.";

/// Replaces a blank call to action
pub const INFER_CTA: &str = "NOT PROVIDED. Write an urgent call to action that invites the click (e.g. Buy Now, Grab 50% Off).";

const BOOSTER_INSTRUCTIONS: &str = r#"CONVERSION BOOSTERS (MANDATORY):
1. **STICKY CTA (mobile only)**: A CTA button floating at the bottom of the screen on mobile. Use the classes `fixed bottom-0 left-0 w-full p-4 bg-white shadow-lg md:hidden z-50`.
2. **URGENCY TIMER**: A simple countdown (e.g. "Promo ends in 15:00 minutes") next to the main CTA button, driven by small vanilla JavaScript.
3. **FAQ SECTION**: 3-5 questions answering the buyer's main doubts (objection handling), built as an accordion with <details> and <summary>.
4. **TRUST BADGES**: Visual badges such as "30-Day Money-Back Guarantee" and "Secure Payment" below the CTA button."#;

const DESIGN_INSTRUCTIONS: &str = r#"DESIGN INSTRUCTIONS (IMPORTANT):
1. **VIBE**: Professional, attractive and "soft". Not plain and boring, not tacky. Eye-catching yet elegant.
2. **COLOR PALETTE**: Soft pastels and gradients.
   - The main background must not be plain white. Use `bg-slate-50`, `bg-blue-50` or a subtle gradient such as `bg-gradient-to-br from-indigo-50 to-white`.
   - A soft but confident primary colour (soft blue, sage green or coral).
3. **LAYOUT & SECTIONS**:
   - Alternating backgrounds between sections (e.g. Hero (gradient) -> Features (white) -> Testimonials (soft grey) -> CTA (accent colour)).
   - Card design (white boxes with subtle shadows) to lift content above coloured backgrounds.
4. **TYPOGRAPHY**: A modern Google Font. Headings in a dark colour (not pure black), body text in dark grey.
5. **UI TRENDS**:
   - Glassmorphism (`bg-white/80 backdrop-blur-md`) for the header or floating cards.
   - Soft, coloured shadows (`shadow-lg`, `shadow-xl`).
   - Rounded corners (`rounded-2xl`, `rounded-3xl`).
6. **TRUST ELEMENTS**: A "Featured in" or "Trusted by" strip with placeholder logos."#;

const TECHNICAL_INSTRUCTIONS: &str = r#"TECHNICAL:
- Tailwind CSS via CDN (mandatory).
- 100% mobile responsive.
- No external CSS or JS other than the Tailwind CDN.
- Complete <html>, <head> and <body> tags."#;

const OUTPUT_CONTRACT: &str = r#"OUTPUT INSTRUCTIONS (JSON ONLY):
Do not return bare HTML. Return exactly one valid JSON object, nothing before or after it, in this shape:
{
    "copywriting": {
        "headline": "A headline that hits hard...",
        "subheadline": "A subheadline explaining the benefit...",
        "body_copy": "Opening paragraph / storytelling...",
        "benefits": ["Benefit 1", "Benefit 2", "Benefit 3"],
        "cta": "CTA button text",
        "guarantee": "Guarantee text..."
    },
    "html_code": "<!DOCTYPE html>..."
}
"html_code" must hold the complete single-file HTML document with Tailwind loaded from its CDN and every other style and script inlined. No external stylesheet or script files."#;

/// Builds generation requests; holds nothing but presentation settings
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    language: String,
}

impl PromptBuilder {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// Build the landing page request
    pub fn build(
        &self,
        brief: &ProductBrief,
        tone: Tone,
        boosters: bool,
        competitor_extract: Option<&str>,
        category: ProductCategory,
    ) -> GenerationRequest {
        let description = or_infer(&brief.description, INFER_DESCRIPTION);
        let target_audience = or_infer(&brief.target_audience, INFER_TARGET_AUDIENCE);
        let cta = or_infer(&brief.cta_text, INFER_CTA);
        let product_name = brief.name.trim();
        let language = &self.language;

        let competitor_block = competitor_extract
            .map(competitor_instructions)
            .unwrap_or_default();
        let booster_block = if boosters { BOOSTER_INSTRUCTIONS } else { "" };

        let base_prompt = format!(
            r#"Act as a world-class expert web developer and UI/UX designer used to handling high-ticket clients.
Your task is to create ONE COMPLETE HTML FILE (single file) for a product landing page to a PREMIUM design standard.

PRODUCT DATA:
- Name: {product_name}
- Description: {description}
- Target: {target_audience}
- CTA: {cta}
- TONE OF VOICE: {tone} (follow this tone in every piece of text!)
- LANGUAGE: write all copy in {language}

{competitor_block}

{DESIGN_INSTRUCTIONS}

{booster_block}

{TECHNICAL_INSTRUCTIONS}"#
        );

        let scenario = scenario_instructions(category, product_name, &brief.target_audience);

        GenerationRequest::new(format!("{base_prompt}\n\n{scenario}\n\n{OUTPUT_CONTRACT}"))
    }

    /// Build the request asking for target audience, CTA and description of a product
    pub fn build_suggestion_request(&self, product_name: &str) -> GenerationRequest {
        let product_name = product_name.trim();
        let language = &self.language;

        GenerationRequest::new(format!(
            r#"Give marketing ideas for the product: "{product_name}".
Write the values in {language}.
Return ONLY JSON in this format:
{{
    "target_audience": "A specific target audience",
    "cta_text": "Short, compelling CTA button text",
    "product_desc": "Persuasive product description (2-3 sentences)"
}}"#
        ))
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LANGUAGE)
    }
}

fn or_infer<'a>(value: &'a str, instruction: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { instruction } else { trimmed }
}

fn competitor_instructions(extract: &str) -> String {
    format!(
        r#"COMPETITOR DATA (OBSERVE, EXTRACT, MODIFY):
Below is the content of a competitor's landing page:
---
{extract}
---
COMPETITOR TASK:
1. Analyse the competitor's structure and copywriting above.
2. EXTRACT their winning campaign points (hook, benefits, offer).
3. DO NOT COPY IT VERBATIM.
4. MODIFY it so our version SELLS MORE, feels MORE PREMIUM and is MORE PERSUASIVE.
5. Beat the quality of their copywriting!"#
    )
}

fn scenario_instructions(category: ProductCategory, product_name: &str, target_audience: &str) -> String {
    let audience = match target_audience.trim() {
        "" => "the target audience",
        given => given,
    };

    match category {
        ProductCategory::Digital => format!(
            r#"SCENARIO: EBOOK / DIGITAL PRODUCT (storytelling mode)
Page structure:
1. **Provocative headline**: Focus on the pain points and frustrations of {audience}. Large, bold type.
2. **Story section**: 2-3 short paragraphs telling a problem the reader relates to, in a warm conversational voice.
3. **Solution**: Introduce {product_name} as the final solution.
4. **What you get**: Bullet list of the product's contents.
5. **Bonus section**: 2-3 relevant bonuses (e.g. cheatsheet, video tutorial) to raise the perceived value.
6. **Pricing & guarantee**: A struck-through (discounted) price and a 30-day money-back guarantee.
7. **Sticky CTA**: A buy button in a strongly contrasting colour."#
        ),
        ProductCategory::Physical => format!(
            r#"SCENARIO: PHYSICAL PRODUCT (visual & urgency mode)
Page structure:
1. **Hero section**: Clean background, a large product image placeholder centre or right. Strong, short headline.
2. **Agitation**: A sub-headline that presses on the problem of {audience} (e.g. "Ever feel self-conscious because...?").
3. **Product solution**: How to use {product_name} and the practical fix it brings.
4. **Benefit grid**: 2x2 or 4-column grid. Icon (emoji or inline SVG) plus an advantage per cell.
5. **Social proof**: Placeholders for 3 customer testimonials (round photo, name, short text).
6. **Scarcity offer**: "Limited promo", "Buy 2 get 1 free" or a visual countdown. Large struck-through price.
7. **Simple form**: A static (display only) form for name and WhatsApp number before the CTA button."#
        ),
    }
}
