use quant_serial_mcu::command_parser::parse_integers;
use quant_serial_mcu::config::{OutputScaling, EXPECTED_INTEGERS};
use quant_serial_mcu::decoder::ResultDecoder;
use quant_serial_mcu::engine::DEFAULT_MODEL;
use quant_serial_mcu::line_buffer::{LineBuffer, LineStatus};
use quant_serial_mcu::quantizer::{QuantizeOutcome, Quantizer};
use quant_serial_mcu::{DenseEngine, InferenceEngine};

fn receive_line(bytes: &[u8]) -> LineBuffer<32> {
    let mut line = LineBuffer::<32>::new();
    for (i, &b) in bytes.iter().enumerate() {
        let status = line.feed(b);
        if i + 1 == bytes.len() {
            assert_eq!(status, LineStatus::Ready);
        } else {
            assert_eq!(status, LineStatus::Accumulating);
        }
    }
    line
}

#[test]
fn test_pipeline_stages_in_order() {
    let line = receive_line(b"6,5,4,3,2,1,0\r");
    let ints = parse_integers(line.as_bytes());
    assert_eq!(ints.len(), EXPECTED_INTEGERS);

    let ints: &[i32; EXPECTED_INTEGERS] = ints.as_slice().try_into().unwrap();
    let mut engine = DenseEngine::new(&DEFAULT_MODEL).unwrap();
    let outcome = Quantizer::default().quantize_into(ints, engine.input_mut());
    assert_eq!(
        outcome,
        QuantizeOutcome::Written([127, 84, 42, 0, -43, -85, -128])
    );

    engine.invoke().unwrap();
    let prediction = ResultDecoder::new(Some(OutputScaling { divisor: 2.0 }))
        .decode(engine.output())
        .unwrap();
    // (255*3 + 212*-2 + 170*5 + 128*1 + 85*-4 + 43*2 + 0*6) / 64 = 1065 / 64
    assert_eq!(prediction.raw, 17);
    assert_eq!(prediction.scaled, Some(8.5));
}

#[test]
fn test_pipeline_wrong_count_never_reaches_quantizer() {
    for line in [&b"\r"[..], &b"1,2,3,4,5,6\r"[..], &b"1,2,3,4,5,6,7,8\r"[..]] {
        let ints = parse_integers(receive_line(line).as_bytes());
        let as_array: Result<&[i32; EXPECTED_INTEGERS], _> = ints.as_slice().try_into();
        assert!(as_array.is_err(), "line {:?} parsed to {:?}", line, ints);
    }
}
