/// Declarative description of an element subtree, used for templates and
/// for building the host page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Markup {
    pub tag: String,
    pub id: Option<String>,
    pub text: String,
    pub classes: Vec<String>,
    pub children: Vec<Markup>,
}

impl Markup {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let markup = Markup::new("SECTION")
            .id("root")
            .class("projects")
            .child(Markup::new("h2").text("Heading"))
            .child(Markup::new("ul"));

        assert_eq!(markup.tag, "section");
        assert_eq!(markup.id.as_deref(), Some("root"));
        assert_eq!(markup.classes, vec!["projects"]);
        assert_eq!(markup.children.len(), 2);
        assert_eq!(markup.children[0].text, "Heading");
    }
}
