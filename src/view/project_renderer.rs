use ramhorns::Template;

use crate::assets::{asset_url_or, PLACEHOLDER_WIDE};
use crate::error::Result;
use crate::model::Project;
use crate::view::{badges, parse_template, ViewTag};

const SHOWN_TECHNOLOGIES: usize = 4;

#[derive(ramhorns::Content)]
struct ProjectItem<'a> {
    title: &'a str,
    description: &'a str,
    category: &'a str,
    image_url: String,
    tech_stack: Vec<ViewTag<'a>>,
    more_tech: String,
    github_link: &'a str,
    live_demo_link: &'a str,
    x_link: &'a str,
}

#[derive(ramhorns::Content)]
struct ProjectsPage<'a> {
    projects: Vec<ProjectItem<'a>>,
}

pub struct ProjectRenderer<'a> {
    pub template: Template<'a>,
}

impl ProjectRenderer<'_> {
    pub fn new(projects_tpl_src: &str) -> Result<ProjectRenderer> {
        Ok(ProjectRenderer {
            template: parse_template("projects", projects_tpl_src)?,
        })
    }

    pub fn render(&self, projects: &[Project], assets_base_url: &str) -> String {
        let projects = projects.iter()
            .map(|project| {
                let (tech_stack, more_tech) = badges(&project.tech_stack, SHOWN_TECHNOLOGIES);
                ProjectItem {
                    title: project.title.as_str(),
                    description: project.description.as_str(),
                    category: project.category.as_str(),
                    image_url: asset_url_or(assets_base_url, project.preview_image_path.as_deref(), PLACEHOLDER_WIDE),
                    tech_stack,
                    more_tech,
                    github_link: project.github_link.as_deref().unwrap_or(""),
                    live_demo_link: project.live_demo_link.as_deref().unwrap_or(""),
                    x_link: project.x_link.as_deref().unwrap_or(""),
                }
            })
            .collect();

        self.template.render(&ProjectsPage { projects })
    }
}
