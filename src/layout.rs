use crate::{
    dom::{Document, Markup},
    domain::BoardConfig,
    error::Result,
};

/// Builds the page the board mounts into: an empty host element plus the
/// form, list and card templates.
pub fn standard_document(config: &BoardConfig) -> Result<Document> {
    let doc = Document::new();

    let host = doc.create_element(&Markup::new("div").id(config.host_id.as_str()));
    doc.append_to_body(host)?;

    let fields = &config.fields;
    let field = |label: &str, tag: &str, id: &str| {
        Markup::new("div")
            .class("form-control")
            .child(Markup::new("label").text(label))
            .child(Markup::new(tag).id(id))
    };

    doc.register_template(
        config.templates.input.as_str(),
        vec![Markup::new("form")
            .child(field("Title", "input", &fields.title))
            .child(field("Description", "textarea", &fields.description))
            .child(field("Effort (person-days)", "input", &fields.effort))
            .child(Markup::new("button").text("ADD PROJECT"))],
    );

    doc.register_template(
        config.templates.list.as_str(),
        vec![Markup::new("section")
            .class("projects")
            .child(Markup::new("header").child(Markup::new("h2")))
            .child(Markup::new("ul"))],
    );

    doc.register_template(
        config.templates.item.as_str(),
        vec![Markup::new("li")
            .child(Markup::new("h2"))
            .child(Markup::new("h3"))
            .child(Markup::new("p"))],
    );

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_document_has_host_and_templates() {
        let config = BoardConfig::default();
        let doc = standard_document(&config).unwrap();

        assert!(doc.get_element_by_id("app").is_some());
        assert!(doc.has_template("project-input"));
        assert!(doc.has_template("project-list"));
        assert!(doc.has_template("single-project"));
    }

    #[test]
    fn test_form_template_exposes_fields() {
        let doc = standard_document(&BoardConfig::default()).unwrap();
        let form = doc.import_template("project-input").unwrap();

        for id in ["#title", "#description", "#manday"] {
            assert!(doc.query_selector(form, id).is_some(), "missing {id}");
        }
    }
}
