define_id_type!(JobId);
define_id_type!(VertexId);
define_id_type!(SlotSharingGroupId);

#[cfg(test)]
mod tests {
    use super::VertexId;

    #[test]
    fn test_vertex_id_text_form() {
        let id = VertexId::new(0xabc);
        assert_eq!(id.to_string(), "00000000000000000000000000000abc");
        assert_eq!("00000000000000000000000000000abc".parse::<VertexId>().unwrap(), id);
        assert_eq!("ABC".parse::<VertexId>().unwrap(), id);
        assert!("xyz".parse::<VertexId>().is_err());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(VertexId::generate(), VertexId::generate());
    }
}
