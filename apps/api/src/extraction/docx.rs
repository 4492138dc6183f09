use std::io::{Cursor, Read};

use anyhow::Context;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts the body paragraphs of the main document part, in document order,
/// joined with `\n`. Empty paragraphs are kept as empty lines.
pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let xml = read_document_part(data).map_err(|e| ExtractionError::Docx(format!("{e:#}")))?;
    let paragraphs =
        collect_paragraphs(&xml).map_err(|e| ExtractionError::Docx(format!("{e:#}")))?;
    Ok(paragraphs.join("\n"))
}

fn read_document_part(data: &[u8]) -> anyhow::Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(data)).context("not a valid DOCX archive")?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("archive has no {DOCUMENT_PART}"))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .with_context(|| format!("{DOCUMENT_PART} is not readable UTF-8"))?;
    Ok(xml)
}

/// Collects the paragraphs that are direct children of `w:body`, the same set
/// Word's object model exposes as the document's paragraphs. Paragraphs nested in
/// tables, block-level content controls and text boxes are not part of it.
fn collect_paragraphs(xml: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    // Open elements above the current event.
    let mut depth = 0usize;
    let mut body_level: Option<usize> = None;
    let mut current: Option<String> = None;
    // Level of an open w:txbxContent or mc:Fallback; everything below it is skipped.
    let mut skipped_level: Option<usize> = None;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let level = depth;
                depth += 1;
                match e.local_name().as_ref() {
                    _ if skipped_level.is_some() => {}
                    b"txbxContent" | b"Fallback" => skipped_level = Some(level),
                    b"body" if body_level.is_none() => body_level = Some(level),
                    b"p" if is_top_level(body_level, level) => current = Some(String::new()),
                    b"r" => run_depth += 1,
                    b"t" => in_text = true,
                    _ => {}
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                let level = depth;
                match skipped_level {
                    Some(skipped) if skipped == level => skipped_level = None,
                    Some(_) => {}
                    None => match e.local_name().as_ref() {
                        b"p" if is_top_level(body_level, level) => {
                            if let Some(paragraph) = current.take() {
                                paragraphs.push(paragraph);
                            }
                        }
                        b"r" => run_depth = run_depth.saturating_sub(1),
                        b"t" => in_text = false,
                        _ => {}
                    },
                }
            }
            Event::Empty(_) if skipped_level.is_some() => {}
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if is_top_level(body_level, depth) => paragraphs.push(String::new()),
                // Outside a run, w:tab is a tab-stop definition, not content.
                b"tab" if run_depth > 0 => push_to(&mut current, "\t"),
                b"br" | b"cr" if run_depth > 0 => push_to(&mut current, "\n"),
                _ => {}
            },
            Event::Text(e) if in_text && skipped_level.is_none() => {
                push_to(&mut current, &e.xml_content()?);
            }
            Event::GeneralRef(e) if in_text && skipped_level.is_none() => {
                if let Some(ch) = e.resolve_char_ref()? {
                    let mut tmp = [0u8; 4];
                    push_to(&mut current, ch.encode_utf8(&mut tmp));
                } else {
                    let name = e.decode()?;
                    if let Some(value) = quick_xml::escape::resolve_predefined_entity(&name) {
                        push_to(&mut current, value);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs)
}

fn is_top_level(body_level: Option<usize>, level: usize) -> bool {
    body_level.is_some_and(|body| level == body + 1)
}

fn push_to(current: &mut Option<String>, text: &str) {
    if let Some(paragraph) = current {
        paragraph.push_str(text);
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{docx_with_body, docx_with_paragraphs};
    use super::*;

    #[test]
    fn test_paragraphs_joined_with_newline_in_order() {
        let docx = docx_with_paragraphs(&["Jane Doe", "5 years Python", "Django, REST APIs"]);
        assert_eq!(
            extract_docx_text(&docx).unwrap(),
            "Jane Doe\n5 years Python\nDjango, REST APIs"
        );
    }

    #[test]
    fn test_runs_are_concatenated_with_their_spaces() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t xml:space="preserve">Senior </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>Engineer</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Senior Engineer");
    }

    #[test]
    fn test_empty_paragraphs_are_kept() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t>Skills</w:t></w:r></w:p><w:p/><w:p><w:pPr/></w:p><w:p><w:r><w:t>Rust</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Skills\n\n\nRust");
    }

    #[test]
    fn test_entities_are_resolved() {
        let docx = docx_with_paragraphs(&["R&amp;D &lt;lead&gt; &#233;t&#xE9;"]);
        assert_eq!(extract_docx_text(&docx).unwrap(), "R&D <lead> été");
    }

    #[test]
    fn test_tabs_and_breaks_inside_runs() {
        let docx = docx_with_body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>2019</w:t><w:tab/><w:t>Acme</w:t><w:br/><w:t>Lead</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "2019\tAcme\nLead");
    }

    #[test]
    fn test_deleted_and_field_text_is_ignored() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t>Kept</w:t></w:r><w:del><w:r><w:delText>Gone</w:delText></w:r></w:del><w:r><w:instrText>PAGE</w:instrText></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Kept");
    }

    #[test]
    fn test_text_box_content_is_not_added() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t>Header</w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></mc:Choice><mc:Fallback><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></mc:Fallback></mc:AlternateContent></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Header");
    }

    #[test]
    fn test_text_box_only_paragraph_is_one_empty_line() {
        let docx = docx_with_body(
            r#"<w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></mc:Choice><mc:Fallback><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></mc:Fallback></mc:AlternateContent></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "");
    }

    #[test]
    fn test_table_paragraphs_are_excluded() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Before");
    }

    #[test]
    fn test_paragraph_after_table_keeps_its_position() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Before\nAfter");
    }

    #[test]
    fn test_block_content_control_is_excluded() {
        let docx = docx_with_body(
            r#"<w:sdt><w:sdtContent><w:p><w:r><w:t>Controlled</w:t></w:r></w:p></w:sdtContent></w:sdt><w:p><w:r><w:t>Plain</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Plain");
    }

    #[test]
    fn test_hyperlink_runs_stay_inline() {
        let docx = docx_with_body(
            r#"<w:p><w:r><w:t xml:space="preserve">Portfolio: </w:t></w:r><w:hyperlink><w:r><w:t>jane.dev</w:t></w:r></w:hyperlink></w:p><w:p><w:r><w:t>Next</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "Portfolio: jane.dev\nNext");
    }

    #[test]
    fn test_zip_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        writer
            .start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_docx_text(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"), "got: {err}");
    }

    #[test]
    fn test_malformed_xml_fails() {
        let docx = docx_with_body("<w:p><w:r><w:t>unterminated</w:r></w:p>");
        assert!(matches!(
            extract_docx_text(&docx),
            Err(ExtractionError::Docx(_))
        ));
    }
}
