//! A4 portrait PDF layout for a [`ProfileDocument`].
//!
//! Text is drawn with the built-in Helvetica faces, so no font files are
//! needed. Values longer than one line are wrapped, and the layout moves to a
//! new page when the current one is full.

use printpdf::image_crate::{DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::document::ProfileDocument;
use crate::RenderError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LABEL_X_MM: f32 = 42.0;
const VALUE_X_MM: f32 = 90.0;

const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 12.0;
const FOOTER_SIZE: f32 = 9.0;
const LINE_HEIGHT_MM: f32 = 7.0;

/// Characters per wrapped value line at [`BODY_SIZE`].
const WRAP_CHARS: usize = 48;

const PHOTO_MAX_MM: f32 = 60.0;
const PHOTO_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

const LAYER_NAME: &str = "Profile";

/// Lay out `document` and return the encoded PDF bytes.
///
/// `photo` is embedded under the title when present.
pub fn encode(
    document: &ProfileDocument,
    photo: Option<&DynamicImage>,
) -> Result<Vec<u8>, RenderError> {
    let (pdf, page, layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut cursor = Cursor {
        layer: pdf.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    // Title
    cursor.layer.set_fill_color(rgb(0.0, 0.4, 0.8));
    cursor.layer.use_text(
        document.title.as_str(),
        TITLE_SIZE,
        Mm(MARGIN_MM),
        Mm(cursor.y),
        &bold,
    );
    cursor.layer.set_fill_color(rgb(0.2, 0.2, 0.2));
    cursor.advance(&pdf, LINE_HEIGHT_MM);
    cursor.separator(&pdf);

    if let Some(image) = photo {
        cursor.photo(&pdf, image);
    }

    for field in &document.fields {
        let lines = wrap(&field.value, WRAP_CHARS);
        cursor.ensure_space(&pdf, LINE_HEIGHT_MM);
        cursor.layer.use_text(
            format!("{}:", field.label),
            BODY_SIZE,
            Mm(LABEL_X_MM),
            Mm(cursor.y),
            &bold,
        );
        for line in lines {
            cursor.ensure_space(&pdf, LINE_HEIGHT_MM);
            cursor
                .layer
                .use_text(line, BODY_SIZE, Mm(VALUE_X_MM), Mm(cursor.y), &regular);
            cursor.advance(&pdf, LINE_HEIGHT_MM);
        }
    }

    if let Some(url) = &document.photo_url {
        cursor.ensure_space(&pdf, LINE_HEIGHT_MM);
        cursor
            .layer
            .use_text("Photo:", BODY_SIZE, Mm(LABEL_X_MM), Mm(cursor.y), &bold);
        for line in wrap(url, WRAP_CHARS) {
            cursor.ensure_space(&pdf, LINE_HEIGHT_MM);
            cursor
                .layer
                .use_text(line, BODY_SIZE, Mm(VALUE_X_MM), Mm(cursor.y), &regular);
            cursor.advance(&pdf, LINE_HEIGHT_MM);
        }
    }

    cursor.separator(&pdf);
    cursor.ensure_space(&pdf, LINE_HEIGHT_MM);
    cursor.layer.set_fill_color(rgb(0.47, 0.47, 0.47));
    cursor.layer.use_text(
        document.footer(),
        FOOTER_SIZE,
        Mm(MARGIN_MM),
        Mm(cursor.y),
        &regular,
    );

    pdf.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Tracks the current layer and the baseline of the next line.
struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor {
    /// Move down, starting a new page when the bottom margin is reached.
    fn advance(&mut self, pdf: &PdfDocumentReference, height: f32) {
        self.y -= height;
        self.ensure_space(pdf, 0.0);
    }

    fn ensure_space(&mut self, pdf: &PdfDocumentReference, height: f32) {
        if self.y - height >= MARGIN_MM {
            return;
        }
        let (page, layer) = pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = pdf.get_page(page).get_layer(layer);
        self.layer.set_fill_color(rgb(0.2, 0.2, 0.2));
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn separator(&mut self, pdf: &PdfDocumentReference) {
        self.ensure_space(pdf, LINE_HEIGHT_MM);
        self.layer.set_outline_color(rgb(0.87, 0.87, 0.87));
        self.layer.set_outline_thickness(0.75);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_MM), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(self.y)), false),
            ],
            is_closed: false,
        });
        self.advance(pdf, LINE_HEIGHT_MM);
    }

    /// Draw the photo centred, scaled to fit a [`PHOTO_MAX_MM`] square.
    fn photo(&mut self, pdf: &PdfDocumentReference, image: &DynamicImage) {
        let (width_px, height_px) = image.dimensions();
        if width_px == 0 || height_px == 0 {
            return;
        }

        let native_width = width_px as f32 / PHOTO_DPI * MM_PER_INCH;
        let native_height = height_px as f32 / PHOTO_DPI * MM_PER_INCH;
        let scale = (PHOTO_MAX_MM / native_width).min(PHOTO_MAX_MM / native_height);
        let width = native_width * scale;
        let height = native_height * scale;

        self.ensure_space(pdf, height);
        let bottom = self.y - height;
        Image::from_dynamic_image(image).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm((PAGE_WIDTH_MM - width) / 2.0)),
                translate_y: Some(Mm(bottom)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(PHOTO_DPI),
                ..Default::default()
            },
        );
        self.y = bottom;
        self.advance(pdf, LINE_HEIGHT_MM);
    }
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Split `text` into lines of at most `width` characters, breaking at spaces
/// where possible. Always returns at least one line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
