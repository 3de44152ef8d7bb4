use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const A4_SHORT: f32 = 595.0;
const A4_LONG: f32 = 842.0;

/// Minimal multi-page table writer on top of pdf-writer.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::portrait()
    }
}

impl PdfManager {
    pub fn portrait() -> Self {
        Self::with_page(A4_SHORT, A4_LONG)
    }

    /// Wide tables (full record exports) need the long edge.
    pub fn landscape() -> Self {
        Self::with_page(A4_LONG, A4_SHORT)
    }

    fn with_page(page_w: f32, page_h: f32) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w,
            page_h,
            margin: 40.0,
            row_h: 20.0,

            next_id: 5,
            font_id,
            bold_font_id,

            font_size: 9.0,
            header_font_size: 10.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn draw_text(content: &mut Content, font: &[u8], x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(font), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(text.as_bytes()));
        content.end_text();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, grey: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(grey.0, grey.1, grey.2);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, col_widths: &[f32], row: &[String], header: bool) {
        let (font, size) = if header {
            (b"F2".as_slice(), self.header_font_size)
        } else {
            (b"F1".as_slice(), self.font_size)
        };

        let mut x = self.margin;
        for (text, w) in row.iter().zip(col_widths) {
            Self::draw_text(content, font, x + 4.0, y + 6.0, size, text);

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *w, self.row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    /// Column widths from header + content, scaled down to the printable width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5 + 8.0).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.len() as f32 * 5.6 + 8.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    /// Draw title, optional subtitle and page number. Returns the y of the first table row.
    fn draw_page_header_footer(
        &self,
        content: &mut Content,
        title: &str,
        subtitle: Option<&str>,
        page: usize,
    ) -> f32 {
        let mut y = self.page_h - self.margin;
        Self::draw_text(content, b"F2", self.margin, y, self.title_font_size, title);

        if let Some(sub) = subtitle {
            y -= self.title_font_size + 6.0;
            Self::draw_text(content, b"F1", self.margin, y, self.header_font_size, sub);
        }

        let pg = format!("Page {}", page);
        Self::draw_text(
            content,
            b"F1",
            self.page_w - self.margin - 40.0,
            self.margin - 25.0,
            self.font_size,
            &pg,
        );

        y - 16.0 - self.row_h
    }

    /// Multi-page table. A header-only page is written when `rows` is empty.
    pub fn write_table(
        &mut self,
        title: &str,
        subtitle: Option<&str>,
        headers: &[&str],
        rows: &[Vec<String>],
    ) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            let mut y = self.draw_page_header_footer(&mut content, title, subtitle, page_idx);

            self.fill_band(&mut content, y, table_w, (0.85, 0.87, 0.90));
            self.draw_row(&mut content, y, &col_widths, &header_row, true);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, (0.96, 0.96, 0.96));
                }
                self.draw_row(&mut content, y, &col_widths, row, false);
                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(self.page_refs.len() as i32)
            .kids(self.page_refs.iter().copied());

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
