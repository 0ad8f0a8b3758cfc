use signcode_core::model::{CompanySize, TrainingRequestDraft, TrainingTopic};

/// State of the employer training form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainingForm {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    /// Selected `<option>` value; empty until the user picks one.
    pub company_size: String,
    pub training_interest: Vec<TrainingTopic>,
    pub message: String,
}

impl TrainingForm {
    #[must_use]
    pub fn is_selected(&self, topic: TrainingTopic) -> bool {
        self.training_interest.contains(&topic)
    }

    /// Tick or untick a training area, keeping the order they were ticked in.
    pub fn toggle_topic(&mut self, topic: TrainingTopic) {
        if let Some(pos) = self.training_interest.iter().position(|t| *t == topic) {
            self.training_interest.remove(pos);
        } else {
            self.training_interest.push(topic);
        }
    }

    /// Convert the form into a draft.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when the company size is not one of the
    /// offered bands. Field rules are left to `TrainingRequestDraft::validate`.
    pub fn to_draft(&self) -> Result<TrainingRequestDraft, String> {
        let size = self.company_size.trim();
        let company_size = if size.is_empty() {
            None
        } else {
            Some(
                CompanySize::from_value(size)
                    .ok_or_else(|| format!("unknown company size: {size}"))?,
            )
        };

        Ok(TrainingRequestDraft {
            company_name: self.company_name.clone(),
            contact_name: self.contact_name.clone(),
            email: self.email.clone(),
            phone: optional(&self.phone),
            company_size,
            training_interest: self.training_interest.clone(),
            message: optional(&self.message),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
