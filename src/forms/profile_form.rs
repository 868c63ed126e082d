use crate::error::ValidationError;
use crate::model::{Profile, Record, SocialLinks, Stack};
use crate::text_utils::{join_list, split_list};

/// One "stack" row of the profile form.
#[derive(Debug, Clone, Default, PartialEq, ramhorns::Content)]
pub struct StackRow {
    pub name: String,
    pub technologies: String,
}

/// The profile form. Stacks are repeated `stack_name` / `stack_technologies`
/// fields, so it is decoded from the raw pairs rather than through serde.
#[derive(Debug, Clone, Default, PartialEq, ramhorns::Content)]
pub struct ProfileForm {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
    pub portfolio: String,
    pub facebook: String,
    pub instagram: String,
    pub skills: String,
    pub interests: String,
    pub what_i_work_on: String,
    pub stacks: Vec<StackRow>,
}

impl ProfileForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = ProfileForm::default();
        let mut names = vec![];
        let mut technologies = vec![];

        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = value,
                "title" => form.title = value,
                "bio" => form.bio = value,
                "email" => form.email = value,
                "location" => form.location = value,
                "github" => form.github = value,
                "linkedin" => form.linkedin = value,
                "twitter" => form.twitter = value,
                "portfolio" => form.portfolio = value,
                "facebook" => form.facebook = value,
                "instagram" => form.instagram = value,
                "skills" => form.skills = value,
                "interests" => form.interests = value,
                "what_i_work_on" => form.what_i_work_on = value,
                "stack_name" => names.push(value),
                "stack_technologies" => technologies.push(value),
                _ => {}
            }
        }

        let rows = names.len().max(technologies.len());
        let mut names = names.into_iter();
        let mut technologies = technologies.into_iter();
        for _ in 0..rows {
            let row = StackRow {
                name: names.next().unwrap_or_default(),
                technologies: technologies.next().unwrap_or_default(),
            };
            // Rows left completely empty are the spare inputs of the form
            if row.name.trim().is_empty() && row.technologies.trim().is_empty() {
                continue;
            }
            form.stacks.push(row);
        }

        form
    }

    pub fn from_profile(profile: &Profile) -> Self {
        let links = &profile.social_links;
        ProfileForm {
            name: profile.name.clone(),
            title: profile.title.clone(),
            bio: profile.bio.clone(),
            email: profile.email.clone(),
            location: profile.location.clone(),
            github: links.github.clone(),
            linkedin: links.linkedin.clone(),
            twitter: links.twitter.clone(),
            portfolio: links.portfolio.clone(),
            facebook: links.facebook.clone(),
            instagram: links.instagram.clone(),
            skills: join_list(&profile.skills),
            interests: join_list(&profile.interests),
            what_i_work_on: profile.what_i_work_on.clone(),
            stacks: profile.stacks.iter()
                .map(|stack| StackRow {
                    name: stack.name.clone(),
                    technologies: join_list(&stack.technologies),
                })
                .collect(),
        }
    }

    pub fn to_profile(&self) -> Result<Profile, ValidationError> {
        let profile = Profile {
            id: 0,
            name: self.name.trim().to_string(),
            title: self.title.trim().to_string(),
            bio: self.bio.trim().to_string(),
            email: self.email.trim().to_string(),
            location: self.location.trim().to_string(),
            social_links: SocialLinks {
                github: self.github.trim().to_string(),
                linkedin: self.linkedin.trim().to_string(),
                twitter: self.twitter.trim().to_string(),
                portfolio: self.portfolio.trim().to_string(),
                facebook: self.facebook.trim().to_string(),
                instagram: self.instagram.trim().to_string(),
            },
            skills: split_list(&self.skills),
            stacks: self.stacks.iter()
                .map(|row| Stack {
                    name: row.name.trim().to_string(),
                    technologies: split_list(&row.technologies),
                })
                .collect(),
            interests: split_list(&self.interests),
            what_i_work_on: self.what_i_work_on.trim().to_string(),
            cv_path: None,
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(body: &str) -> Vec<(String, String)> {
        serde_urlencoded::from_str(body).unwrap()
    }

    #[test]
    fn test_from_pairs() {
        let form = ProfileForm::from_pairs(pairs(
            "name=Jane&title=Engineer&email=jane%40example.com&skills=Rust%2C+Go\
             &stack_name=Backend&stack_technologies=Rust%2C+Postgres\
             &stack_name=&stack_technologies=\
             &stack_name=Frontend&stack_technologies=React"));
        assert_eq!(form.stacks, vec![
            StackRow { name: "Backend".to_string(), technologies: "Rust, Postgres".to_string() },
            StackRow { name: "Frontend".to_string(), technologies: "React".to_string() },
        ]);

        let profile = form.to_profile().unwrap();
        assert_eq!(profile.skills, ["Rust", "Go"]);
        assert_eq!(profile.stacks[0].technologies, ["Rust", "Postgres"]);
        assert!(profile.social_links.present().is_empty());
    }

    #[test]
    fn test_stack_without_name() {
        let form = ProfileForm::from_pairs(pairs(
            "name=Jane&title=Engineer&email=jane%40example.com&stack_name=+&stack_technologies=Rust"));
        assert_eq!(form.stacks.len(), 1);
        assert_eq!(form.to_profile(), Err(ValidationError::Required("Stack name")));
    }

    #[test]
    fn test_profile_round_trip_through_form() {
        let form = ProfileForm::from_pairs(pairs(
            "name=Jane&title=Engineer&email=jane%40example.com&github=https%3A%2F%2Fgithub.com%2Fjane\
             &interests=Climbing&stack_name=Backend&stack_technologies=Rust"));
        let profile = form.to_profile().unwrap();
        assert_eq!(ProfileForm::from_profile(&profile), form);
    }
}
