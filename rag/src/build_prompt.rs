/// Final instruction sent to the model. The model must answer only from
/// `context`.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "\nAnswer the student's question based ONLY on the context below.\n\nContext:\n{}\n\nQuestion: {}\n",
        context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_context_and_question() {
        let prompt = build_prompt("Hostel fee is $100/month.", "What is the hostel fee?");
        assert_eq!(
            prompt,
            "\nAnswer the student's question based ONLY on the context below.\n\n\
             Context:\nHostel fee is $100/month.\n\nQuestion: What is the hostel fee?\n"
        );
    }
}
