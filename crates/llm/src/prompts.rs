//! Prompt templates for outreach emails
//!
//! A full email template is assembled from fixed blocks in this order:
//! category opening, tone guidance, expertise list, category details.
//! The details blocks carry the `{job}`, `{pain}`, `{name}` and
//! `{job_title}` placeholders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::template::{values, PromptTemplate, TemplateError};

/// Opening instruction for job postings
pub const JOB_OPENING: &str = r#"
Write a very short outreach email to a hiring manager. The email should be no longer than 100 words total. This person is looking for a person to fill their position but I'd like to offer myself as a capable temporary consultant that can either fill the role or help in some other way. 

Most importantly, this email should address they KEY MESSAGE provided below. 
"#;

/// Opening instruction for research grants
pub const GRANT_OPENING: &str = r#"
Write a very short outreach email to a person that is the lead researcher for a research grant. The email should be no longer than 100 words total. I'd like to position myself as a competent course-builder who can help them build courses as part of their grant activities. 

Most importantly, this email should address they KEY MESSAGE provided below. 
"#;

/// Shared tone guidance
pub const TONE_GUIDANCE: &str = r#"

The email should incorporate some of the following elements:
Friendly Introduction: Starting with a casual greeting and acknowledging the recipient's current activities or needs.
Professional Background: Highlighting your extensive experience in a specific field, emphasizing key areas of expertise. I have included a list of my key expertise below.
Offer of Support: Expressing willingness to assist, collaborate, or share ideas, even if not directly applying for the role.
Community Involvement: Mentioning your role in a relevant professional community, indicating your willingness to engage and share knowledge.
Invitation to Collaborate: Offering an opportunity for the recipient or their team to join a community or event, fostering professional networking and growth. 
Personalized Sign-Off: Maintaining a friendly and approachable tone until the end of the email.

The email should NOT be salesy. It should not use big words. And it should focus more on making a personal connection in order to elicit a phone call or connection on LinkedIn, rather than directly a hire. 

"#;

/// Shared expertise list
pub const EXPERTISE: &str = r#"

My key expertise:
- I've spent the last 10 years working on Open edX courses
- I am adept at building exciting games and other interactives for online courses. 
- I've got a team of people who can support all aspects of course creation. From instructional design to media creation like videos and infographics. 
- I understand how to read and leverage data especially in large online courses. 
- The courses we build are exceptionally aesthetically pleasing. 
- I chair the Open edX Educators working group. It's a community of practice for educators who build courses on Open edX. Very good way to share and learn how others are being creative with the platform. I'd love to invite you or your new hire to an upcoming session! 

"#;

/// Details block for job postings
pub const JOB_DETAILS: &str = r#"
Here are the details I know about the job and the contact: 
JOB: {job}
KEY MESSAGE: {pain}
HIRING MANAGER NAME: {name}
HIRING MANAGER TITLE: {job_title}

"#;

/// Details block for research grants
pub const GRANT_DETAILS: &str = r#"
Here are the details I know about the grant and the contact: 
GRANT DETAILS: {job}
KEY MESSAGE: {pain}
LEAD RESEARCHER NAME: {name}
LEAD RESEARCHER TITLE: {job_title}

"#;

/// Starter email for job postings, indicative of style and tone
pub const JOB_STYLE_SAMPLE: &str = r#"

And here is a starter template that is indicative of my style and tone: 

Hi [LEAD RESEARCHER NAME],

I came across your posting for [JOB] and wanted to reach out. I hope your search for candidates is going well!

Over the past 10 years, I've been deeply involved in [specific area of expertise or platform, e.g., Open edX], focusing on [key aspects of your work, e.g., building courses, customizing platforms, integrating third-party tools]. My work includes [mention any specific projects or achievements, e.g., creating custom assessments, games, and simulations].


All the best,
[Your Name]

"#;

/// Starter email for research grants, indicative of style and tone
pub const GRANT_STYLE_SAMPLE: &str = r#"

And here is a starter template that is indicative of my style and tone: 

Hi [Recipient's Name],

I came across your [grant award]. 

Over the past [number of years] years, I've been deeply involved in [specific area of expertise or platform, e.g., Open edX], focusing on [key aspects of your work, e.g., building courses, customizing platforms, integrating third-party tools]. My work includes [mention any specific projects or achievements, e.g., creating custom assessments, games, and simulations].

If you ever want some support building out any online instructional materials or just want to bounc ideas off someone, don't hesitate to reach out.

Here is my Linkedin: [Your LinkedIn]
And website: [Your website]

All the best,
[Your Name]

"#;

/// Summarization instruction for the opportunity description
pub const SHORTEN_DESCRIPTION: &str = "
\tTake this text and summarize it in 50 words or less, focusing especially on the parts about online courses, online learning, or Open edX if applicable:

\tTEXT: {job}
\t";

/// Kind of opportunity the email responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Job posting (hiring manager)
    #[default]
    Job,
    /// Research grant (lead researcher)
    Grant,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Job, Category::Grant];

    /// Label shown in the selector
    pub fn label(self) -> &'static str {
        match self {
            Category::Job => "Job Posting",
            Category::Grant => "Grant",
        }
    }

    /// Value used in forms and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Job => "job",
            Category::Grant => "grant",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "job" | "job posting" => Ok(Category::Job),
            "grant" => Ok(Category::Grant),
            other => Err(format!(
                "unknown category '{}' (expected 'job' or 'grant')",
                other
            )),
        }
    }
}

/// Full email template for a category
pub fn full_template(category: Category) -> PromptTemplate {
    let (name, opening, details) = match category {
        Category::Job => ("job_email", JOB_OPENING, JOB_DETAILS),
        Category::Grant => ("grant_email", GRANT_OPENING, GRANT_DETAILS),
    };

    PromptTemplate::new(
        name,
        [opening, TONE_GUIDANCE, EXPERTISE, details].concat(),
    )
}

/// Template that condenses an opportunity description
pub fn shorten_template() -> PromptTemplate {
    PromptTemplate::new("shorten_description", SHORTEN_DESCRIPTION)
}

/// Starter email appended when a style sample is requested
pub fn style_sample(category: Category) -> &'static str {
    match category {
        Category::Job => JOB_STYLE_SAMPLE,
        Category::Grant => GRANT_STYLE_SAMPLE,
    }
}

/// Values for the email details block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailFields<'a> {
    /// Shortened opportunity description
    pub job: &'a str,
    /// Key message the email should address
    pub pain: &'a str,
    /// Contact name
    pub name: &'a str,
    /// Contact title
    pub job_title: &'a str,
}

/// Prompt asking for a short summary of the description
pub fn compose_shorten_prompt(description: &str) -> Result<String, TemplateError> {
    shorten_template().render(&values([("job", description)]))
}

/// Prompt asking for the final email
pub fn compose_email_prompt(
    category: Category,
    fields: &EmailFields<'_>,
    include_style_sample: bool,
) -> Result<String, TemplateError> {
    let mut prompt = full_template(category).render(&values([
        ("job", fields.job),
        ("pain", fields.pain),
        ("name", fields.name),
        ("job_title", fields.job_title),
    ]))?;

    if include_style_sample {
        prompt.push_str(style_sample(category));
    }

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: [&str; 4] = ["{job}", "{pain}", "{name}", "{job_title}"];

    fn sample_fields() -> EmailFields<'static> {
        EmailFields {
            job: "Seeking an online course designer for a 3-month contract",
            pain: "I can build interactive courses fast",
            name: "Jane Doe",
            job_title: "Director of Learning",
        }
    }

    #[test]
    fn test_full_templates_have_four_placeholders() {
        for category in Category::ALL {
            let placeholders = full_template(category).placeholders().unwrap();
            assert_eq!(placeholders, vec!["job", "pain", "name", "job_title"]);
        }
    }

    #[test]
    fn test_full_template_block_order() {
        let body = full_template(Category::Job).body;
        let opening = body.find("hiring manager").unwrap();
        let tone = body.find("Friendly Introduction").unwrap();
        let expertise = body.find("My key expertise").unwrap();
        let details = body.find("HIRING MANAGER NAME").unwrap();
        assert!(opening < tone && tone < expertise && expertise < details);
    }

    #[test]
    fn test_rendered_email_has_no_tokens() {
        for category in Category::ALL {
            let prompt = compose_email_prompt(category, &sample_fields(), false).unwrap();
            for token in TOKENS {
                assert!(!prompt.contains(token), "{} left in {:?} prompt", token, category);
            }
            assert!(prompt.contains("Jane Doe"));
            assert!(prompt.contains("Director of Learning"));
            assert!(prompt.contains("I can build interactive courses fast"));
        }
    }

    #[test]
    fn test_categories_route_to_their_blocks() {
        let job = compose_email_prompt(Category::Job, &sample_fields(), false).unwrap();
        let grant = compose_email_prompt(Category::Grant, &sample_fields(), false).unwrap();

        assert!(job.contains("temporary consultant"));
        assert!(job.contains("HIRING MANAGER TITLE: Director of Learning"));
        assert!(!job.contains("LEAD RESEARCHER"));

        assert!(grant.contains("course-builder"));
        assert!(grant.contains("LEAD RESEARCHER TITLE: Director of Learning"));
        assert!(!grant.contains("HIRING MANAGER"));

        assert_ne!(job, grant);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose_email_prompt(Category::Grant, &sample_fields(), true).unwrap();
        let b = compose_email_prompt(Category::Grant, &sample_fields(), true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shorten_prompt_single_substitution() {
        let description = "We are hiring an Open edX course builder to redesign our catalog";
        let prompt = compose_shorten_prompt(description).unwrap();

        assert_eq!(prompt.matches(description).count(), 1);
        assert!(!prompt.contains("{job}"));
        assert!(prompt.contains("50 words or less"));
        assert_eq!(shorten_template().placeholders().unwrap(), vec!["job"]);
    }

    #[test]
    fn test_style_sample_is_appended_on_request() {
        let without = compose_email_prompt(Category::Job, &sample_fields(), false).unwrap();
        let with = compose_email_prompt(Category::Job, &sample_fields(), true).unwrap();

        assert!(!without.contains("starter template"));
        assert!(with.ends_with(JOB_STYLE_SAMPLE));
        assert!(with.starts_with(&without));
    }

    #[test]
    fn test_fixed_blocks_keep_source_wording() {
        for opening in [JOB_OPENING, GRANT_OPENING] {
            assert!(opening.contains("this email should address they KEY MESSAGE provided below. \n"));
        }
        assert!(JOB_DETAILS.contains("about the job and the contact: \nJOB: {job}\n"));
        assert!(SHORTEN_DESCRIPTION.starts_with("\n\tTake this text"));
        assert!(SHORTEN_DESCRIPTION.ends_with("\tTEXT: {job}\n\t"));
        assert!(GRANT_STYLE_SAMPLE.contains("just want to bounc ideas off someone"));
        assert!(JOB_STYLE_SAMPLE.contains("Hi [LEAD RESEARCHER NAME],"));
    }

    #[test]
    fn test_empty_fields_render() {
        let prompt = compose_email_prompt(Category::Job, &EmailFields::default(), false).unwrap();
        assert!(prompt.contains("HIRING MANAGER NAME: \n"));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("job".parse::<Category>().unwrap(), Category::Job);
        assert_eq!("Job Posting".parse::<Category>().unwrap(), Category::Job);
        assert_eq!(" GRANT ".parse::<Category>().unwrap(), Category::Grant);
        assert!("internship".parse::<Category>().is_err());
        assert_eq!(Category::Grant.to_string(), "Grant");
        assert_eq!(Category::default(), Category::Job);
    }
}
