use huff::tree::NodeType;
use huff::{BitOrder, Codec, CodecOptions, FrequencyTable, HuffmanTree, Termination, store};
use proptest::prelude::*;

fn bit_order() -> impl Strategy<Value = BitOrder> {
    prop_oneof![Just(BitOrder::MsbFirst), Just(BitOrder::LsbFirst)]
}

proptest! {
    #[test]
    fn test_roundtrip(input in prop::collection::vec(any::<u8>(), 0..512), bit_order in bit_order()) {
        let codec = Codec::new(CodecOptions { bit_order, termination: Termination::SymbolCount });
        let encoded = codec.encode(&input).unwrap();
        prop_assert_eq!(encoded.payload.len(), encoded.bit_len.div_ceil(8));

        let decoded = codec.decode(&encoded.payload, &encoded.frequencies).unwrap();
        prop_assert_eq!(decoded, input);
    }

    #[test]
    fn test_skewed_alphabet_roundtrip(input in prop::collection::vec(0..4u8, 1..256)) {
        let codec = Codec::default();
        let encoded = codec.encode(&input).unwrap();
        let decoded = codec.decode(&encoded.payload, &encoded.frequencies).unwrap();
        prop_assert_eq!(decoded, input);
    }

    #[test]
    fn test_byte_boundary_only_appends(input in prop::collection::vec(any::<u8>(), 1..256)) {
        let encoded = Codec::default().encode(&input).unwrap();
        let legacy = Codec::new(CodecOptions { termination: Termination::ByteBoundary, ..CodecOptions::default() })
            .decode(&encoded.payload, &encoded.frequencies)
            .unwrap();

        prop_assert!(legacy.starts_with(&input));
        if encoded.bit_len % 8 == 0 {
            prop_assert_eq!(legacy, input);
        }
    }

    #[test]
    fn test_codes_are_prefix_free(input in prop::collection::vec(any::<u8>(), 1..512)) {
        let frequencies = FrequencyTable::from_bytes(&input);
        let codes = HuffmanTree::build(&frequencies).unwrap().code_table().unwrap();

        prop_assert_eq!(codes.len(), frequencies.len());
        prop_assert!(codes.iter().all(|(_, code)| !code.is_empty()));
        for (a, code_a) in codes.iter() {
            for (b, code_b) in codes.iter() {
                if a != b {
                    prop_assert!(!code_a.is_prefix_of(code_b), "{} prefixes {}", code_a, code_b);
                }
            }
        }
    }

    #[test]
    fn test_weights_sum(input in prop::collection::vec(any::<u8>(), 1..512)) {
        let frequencies = FrequencyTable::from_bytes(&input);
        let tree = HuffmanTree::build(&frequencies).unwrap();

        prop_assert_eq!(tree.weight(), input.len() as u64);
        prop_assert_eq!(tree.leaf_count(), frequencies.len());
        prop_assert_eq!(tree.internal_count(), frequencies.len() - 1);
        for (_, node) in tree.nodes() {
            if let NodeType::Internal { left, right } = node.node_type {
                prop_assert_eq!(node.weight, tree.node(left).weight + tree.node(right).weight);
            }
        }
    }

    #[test]
    fn test_store_roundtrip(counts in prop::collection::btree_map(any::<u8>(), 1..u64::MAX, 0..64)) {
        let table: FrequencyTable = counts.into_iter().collect();
        let mut doc = Vec::new();
        store::write_to(&table, &mut doc).unwrap();
        prop_assert_eq!(store::read_from(doc.as_slice()).unwrap(), table);
    }
}
