use ramhorns::Template;

use crate::error::Result;
use crate::model::Profile;
use crate::view::{parse_template, ViewLink, ViewTag};

#[derive(ramhorns::Content)]
struct ViewStack<'a> {
    name: &'a str,
    technologies: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct HomePage<'a> {
    has_profile: bool,
    name: &'a str,
    title: &'a str,
    bio: &'a str,
    location: &'a str,
    what_i_work_on: &'a str,
    skills: Vec<ViewTag<'a>>,
    stacks: Vec<ViewStack<'a>>,
    interests: Vec<ViewTag<'a>>,
    social_links: Vec<ViewLink<'a>>,
}

pub struct HomeRenderer<'a> {
    pub template: Template<'a>,
}

impl HomeRenderer<'_> {
    pub fn new(home_tpl_src: &str) -> Result<HomeRenderer> {
        Ok(HomeRenderer {
            template: parse_template("home", home_tpl_src)?,
        })
    }

    pub fn render(&self, profile: Option<&Profile>) -> String {
        let Some(profile) = profile else {
            return self.template.render(&HomePage {
                has_profile: false,
                name: "",
                title: "",
                bio: "",
                location: "",
                what_i_work_on: "",
                skills: vec![],
                stacks: vec![],
                interests: vec![],
                social_links: vec![],
            });
        };

        let stacks = profile.stacks.iter()
            .map(|stack| ViewStack {
                name: stack.name.as_str(),
                technologies: ViewTag::list(&stack.technologies),
            })
            .collect();

        self.template.render(&HomePage {
            has_profile: true,
            name: profile.name.as_str(),
            title: profile.title.as_str(),
            bio: profile.bio.as_str(),
            location: profile.location.as_str(),
            what_i_work_on: profile.what_i_work_on.as_str(),
            skills: ViewTag::list(&profile.skills),
            stacks,
            interests: ViewTag::list(&profile.interests),
            social_links: ViewLink::list(profile.social_links.present()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::model::Stack;

    use super::*;

    #[test]
    fn render_home() {
        let template_src = "{{^has_profile}}EMPTY{{/has_profile}}{{#has_profile}}{{name}}/{{title}}\
            {{#stacks}}[{{name}}:{{#technologies}}{{tag}},{{/technologies}}]{{/stacks}}\
            {{#skills}}({{tag}}){{/skills}}{{/has_profile}}";
        let renderer = HomeRenderer::new(template_src).unwrap();
        assert_eq!(renderer.render(None), "EMPTY");

        let profile = Profile {
            name: "Jane".to_string(),
            title: "Engineer".to_string(),
            skills: vec!["Rust".to_string()],
            stacks: vec![Stack { name: "Backend".to_string(), technologies: vec!["Rust".to_string(), "SQL".to_string()] }],
            ..Default::default()
        };
        assert_eq!(renderer.render(Some(&profile)), "Jane/Engineer[Backend:Rust,SQL,](Rust)");
    }
}
